// Wire constants for Nexus plot files

use crate::core::token::FixedStr;

pub const TYPE_TAG: &[u8; 12] = b"PLOT  BIN   ";
pub const STOP_TAG: FixedStr<8> = FixedStr::new(*b"STOP    ");

// Header: prefix(4) type tag(12) version/simulator blobs(4 x 6) unit system(6)
pub const HEADER_PREFIX_SIZE: u64 = 4;
pub const HEADER_BLOB_SIZE: u64 = 6;
pub const HEADER_BLOB_COUNT: usize = 4;
pub const HEADER_PADDING_SIZE: u64 = 530 + 264;
pub const HEADER_FIELD_COUNT: usize = 8;

// Every section in the catalog and record stream is framed by this
pub const SEPARATOR_SIZE: u64 = 8;

// Catalog: per class a time variable name precedes the variable codes
pub const TIME_VARNAME_SIZE: u64 = 4;

// Block header: timestep, time, item count, max items, max perfs
pub const BLOCK_WORD_COUNT: usize = 5;

// Per item: unused region between instance name and values
pub const ITEM_PADDING_SIZE: u64 = 64;

pub const CLASS_NAME_SIZE: usize = 8;
pub const VARIABLE_CODE_SIZE: usize = 4;
pub const UNIT_TAG_SIZE: usize = 6;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

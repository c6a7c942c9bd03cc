pub mod compression;
pub mod constants;
pub mod convert;
pub mod data_handle;
pub mod error;
pub mod format;
pub mod reader;
pub mod stream;
pub mod summary;
pub mod token;
pub mod units;

#[cfg(test)]
pub(crate) mod fixture;

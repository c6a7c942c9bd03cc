// Compression backends for plot files

use crate::core::error::{PlotError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    None,
    Gzip,
    Lz4,
    Zstd,
}

impl CompressionType {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => CompressionType::Gzip,
            Some("lz4") => CompressionType::Lz4,
            Some("zst") => CompressionType::Zstd,
            _ => CompressionType::None,
        }
    }
}

/// Opens `path` for decoding. Failing to open the file is `ReadError`.
pub fn open_plot_file(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|source| PlotError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    decompress(BufReader::new(file), CompressionType::from_path(path))
}

pub fn decompress<R: Read + 'static>(
    reader: R,
    compression: CompressionType,
) -> Result<Box<dyn Read>> {
    match compression {
        CompressionType::None => Ok(Box::new(reader)),

        CompressionType::Gzip => Ok(Box::new(GzDecoder::new(reader))),

        #[cfg(feature = "lz4")]
        CompressionType::Lz4 => Ok(Box::new(lz4::Decoder::new(reader)?)),

        #[cfg(not(feature = "lz4"))]
        CompressionType::Lz4 => Err(unsupported("lz4")),

        #[cfg(feature = "zstd")]
        CompressionType::Zstd => Ok(Box::new(zstd::stream::read::Decoder::new(reader)?)),

        #[cfg(not(feature = "zstd"))]
        CompressionType::Zstd => Err(unsupported("zstd")),
    }
}

#[allow(dead_code)]
fn unsupported(name: &str) -> PlotError {
    PlotError::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("{} support not compiled in", name),
    ))
}

// Error handling for the Nexus plot reader

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("could not open {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad header: {0}")]
    BadHeader(String),

    #[error("unrecognized unit system: {0:?}")]
    UnrecognizedUnitSystem(String),

    #[error("unexpected end of file at offset {offset} while reading {field}")]
    UnexpectedEndOfFile { offset: u64, field: &'static str },

    #[error("inconsistent time axis: timestep {timestep} has times {first} and {second}")]
    InconsistentTimeAxis {
        timestep: i32,
        first: f32,
        second: f32,
    },

    #[error("unknown variable: {0:?}")]
    UnknownVariable(String),

    #[error("invalid start date {day}/{month}/{year}")]
    InvalidStartDate { day: i32, month: i32, year: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

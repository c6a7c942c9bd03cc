// Nexus plot file reader
// Main library entry point

pub mod core;

// Re-export main types
pub use crate::core::convert::{
    convert, ConvertOptions, ConvertedSeries, KeywordTable, SummaryVector, TimePoint,
};
pub use crate::core::data_handle::handle_ws_fetch;
pub use crate::core::error::{PlotError, Result};
pub use crate::core::format::{Header, Plot, Sample, VariableCatalog};
pub use crate::core::reader::{load, load_from};
pub use crate::core::summary::{JsonSummaryWriter, SummaryCase, SummaryWriter};
pub use crate::core::token::{ClassName, FixedStr, InstanceName, VariableCode};
pub use crate::core::units::{Measure, UnitSystem, UnitType};

// Projects decoded plot samples onto summary keywords

use crate::core::error::{PlotError, Result};
use crate::core::format::{Plot, Sample};
use crate::core::token::VariableCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

const FIELD_KEYWORDS: [(&str, &str); 14] = [
    ("QOP", "FOPR"),
    ("QWP", "FWPR"),
    ("QGP", "FGPR"),
    ("GOR", "FGOR"),
    ("WCUT", "FWCT"),
    ("COP", "FOPT"),
    ("CWP", "FWPT"),
    ("CGP", "FGPT"),
    ("QWI", "FWIR"),
    ("QGI", "FGIR"),
    ("CWI", "FWIT"),
    ("CGI", "FGIT"),
    ("QPP", "FCPR"),
    ("CPP", "FCPC"),
];

/// Variable code to output keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTable {
    entries: HashMap<VariableCode, String>,
}

impl KeywordTable {
    /// The fixed field-level table.
    pub fn field() -> Self {
        Self {
            entries: FIELD_KEYWORDS
                .iter()
                .map(|(code, kw)| (VariableCode::padded(code), kw.to_string()))
                .collect(),
        }
    }

    /// Adds or overrides entries, keyed by trimmed variable code.
    pub fn with_extra<'a, I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (code, kw) in extra {
            self.entries.insert(VariableCode::padded(code), kw.clone());
        }
        self
    }

    pub fn keyword(&self, code: &VariableCode) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::field()
    }
}

fn default_class() -> String {
    "FIELD".to_string()
}

fn default_instance() -> String {
    "NETWORK".to_string()
}

/// Which series to convert. Deserialized from the extension's
/// `configuration` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertOptions {
    #[serde(default = "default_class")]
    pub class: String,
    #[serde(default = "default_instance")]
    pub instance: String,
    #[serde(default)]
    pub keywords: BTreeMap<String, String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            class: default_class(),
            instance: default_instance(),
            keywords: BTreeMap::new(),
        }
    }
}

impl ConvertOptions {
    pub fn table(&self) -> KeywordTable {
        KeywordTable::field().with_extra(&self.keywords)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimePoint {
    pub timestep: i32,
    /// Elapsed simulation time in days.
    pub time: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryVector {
    pub keyword: String,
    pub variable: VariableCode,
    pub unit: String,
    /// (index into the time axis, value)
    pub points: Vec<(usize, f32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedSeries {
    pub vectors: Vec<SummaryVector>,
    pub time_axis: Vec<TimePoint>,
    /// Variable codes with no keyword or unit, dropped from `vectors`.
    pub skipped: Vec<VariableCode>,
}

impl ConvertedSeries {
    pub fn get(&self, keyword: &str) -> Option<&SummaryVector> {
        self.vectors.iter().find(|v| v.keyword == keyword)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.vectors.iter().map(|v| v.keyword.as_str())
    }
}

pub fn convert(plot: &Plot, options: &ConvertOptions) -> Result<ConvertedSeries> {
    convert_with(plot, &options.class, &options.instance, &options.table())
}

pub fn convert_with(
    plot: &Plot,
    class: &str,
    instance: &str,
    table: &KeywordTable,
) -> Result<ConvertedSeries> {
    let mut selected: Vec<&Sample> = plot
        .samples_where(Some(class), Some(instance), None)
        .collect();
    selected.sort_by_key(|s| s.timestep);

    let time_axis = time_axis(&selected)?;

    // catalog order first, then anything else seen in the samples
    let mut codes: Vec<VariableCode> = plot.variables(class);
    for s in &selected {
        if !codes.contains(&s.variable) {
            codes.push(s.variable);
        }
    }
    codes.retain(|c| selected.iter().any(|s| s.variable == *c));

    let unit_system = plot.header.unit_system;
    let mut vectors = Vec::new();
    let mut skipped = Vec::new();

    for code in codes {
        let Some(keyword) = table.keyword(&code) else {
            warn!("Could not convert nexus variable {} to a summary keyword", code);
            skipped.push(code);
            continue;
        };
        let unit = match unit_system.variable_unit_str(&code.trimmed()) {
            Ok(unit) => unit,
            Err(e) => {
                warn!("Skipping {} ({}): {}", code, keyword, e);
                skipped.push(code);
                continue;
            }
        };

        let points = selected
            .iter()
            .filter(|s| s.variable == code)
            .map(|s| (axis_index(&time_axis, s.timestep), s.value))
            .collect();

        vectors.push(SummaryVector {
            keyword: keyword.to_string(),
            variable: code,
            unit: unit.to_string(),
            points,
        });
    }

    debug!(
        "Converted {}/{}: {} vectors over {} timesteps, {} skipped",
        class,
        instance,
        vectors.len(),
        time_axis.len(),
        skipped.len()
    );

    Ok(ConvertedSeries {
        vectors,
        time_axis,
        skipped,
    })
}

/// Unique (timestep, time) pairs from samples already sorted by timestep.
fn time_axis(sorted: &[&Sample]) -> Result<Vec<TimePoint>> {
    let mut axis: Vec<TimePoint> = Vec::new();
    for s in sorted {
        match axis.last() {
            Some(last) if last.timestep == s.timestep => {
                if last.time != s.time {
                    return Err(PlotError::InconsistentTimeAxis {
                        timestep: s.timestep,
                        first: last.time,
                        second: s.time,
                    });
                }
            }
            _ => axis.push(TimePoint {
                timestep: s.timestep,
                time: s.time,
            }),
        }
    }
    Ok(axis)
}

// every selected timestep is on the axis by construction
fn axis_index(axis: &[TimePoint], timestep: i32) -> usize {
    axis.partition_point(|p| p.timestep < timestep)
}

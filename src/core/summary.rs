// Hand-off to summary writers

use crate::core::constants::SECONDS_PER_DAY;
use crate::core::convert::ConvertedSeries;
use crate::core::error::{PlotError, Result};
use crate::core::format::Plot;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryKeyword {
    pub keyword: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStep {
    /// 1-based report step.
    pub step: usize,
    pub elapsed_seconds: f64,
    /// One value per keyword, `None` where the series has no sample.
    pub values: Vec<Option<f32>>,
}

/// Everything a summary writer needs, in writer terms.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryCase {
    pub case: String,
    pub start_date: NaiveDate,
    pub grid: [i32; 3],
    pub keywords: Vec<SummaryKeyword>,
    pub steps: Vec<SummaryStep>,
}

impl SummaryCase {
    pub fn new(case: &str, plot: &Plot, series: &ConvertedSeries) -> Result<Self> {
        let h = &plot.header;
        let start_date = u32::try_from(h.month)
            .ok()
            .zip(u32::try_from(h.day).ok())
            .and_then(|(m, d)| NaiveDate::from_ymd_opt(h.year, m, d))
            .ok_or(PlotError::InvalidStartDate {
                day: h.day,
                month: h.month,
                year: h.year,
            })?;

        let keywords = series
            .vectors
            .iter()
            .map(|v| SummaryKeyword {
                keyword: v.keyword.clone(),
                unit: v.unit.clone(),
            })
            .collect();

        let mut steps: Vec<SummaryStep> = series
            .time_axis
            .iter()
            .enumerate()
            .map(|(i, p)| SummaryStep {
                step: i + 1,
                elapsed_seconds: f64::from(p.time) * SECONDS_PER_DAY,
                values: vec![None; series.vectors.len()],
            })
            .collect();
        for (k, vector) in series.vectors.iter().enumerate() {
            for (index, value) in &vector.points {
                if let Some(step) = steps.get_mut(*index) {
                    step.values[k] = Some(*value);
                }
            }
        }

        Ok(Self {
            case: case.to_string(),
            start_date,
            grid: [h.nx, h.ny, h.nz],
            keywords,
            steps,
        })
    }
}

/// Persists a converted case in some summary format.
pub trait SummaryWriter {
    fn write(&mut self, case: &SummaryCase) -> Result<()>;
}

pub struct JsonSummaryWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonSummaryWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SummaryWriter for JsonSummaryWriter<W> {
    fn write(&mut self, case: &SummaryCase) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, case)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convert::{convert, ConvertOptions};
    use crate::core::fixture::*;
    use crate::core::reader::load_from;

    fn two_step_plot() -> Plot {
        let bytes = PlotBuilder::new(b"METBAR")
            .class("FIELD", &["QOP", "WCUT"])
            .block(Block::new("FIELD", 1, 0.0).item("NETWORK", &[12.5, 0.3]))
            .block(Block::new("FIELD", 2, 1.5).item("NETWORK", &[11.0, 0.4]))
            .build();
        load_from(&bytes[..]).unwrap()
    }

    #[test]
    fn test_case_assembly() {
        let plot = two_step_plot();
        let series = convert(&plot, &ConvertOptions::default()).unwrap();
        let case = SummaryCase::new("ECL_CASE", &plot, &series).unwrap();

        assert_eq!(case.start_date, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap());
        assert_eq!(case.grid, [10, 10, 3]);
        assert_eq!(case.keywords.len(), 2);
        assert_eq!(case.keywords[0].keyword, "FOPR");
        assert_eq!(case.steps.len(), 2);
        assert_eq!(case.steps[0].step, 1);
        assert_eq!(case.steps[1].step, 2);
        assert_eq!(case.steps[1].elapsed_seconds, 1.5 * 86_400.0);
        assert_eq!(case.steps[1].values, vec![Some(11.0), Some(0.4)]);
    }

    #[test]
    fn test_invalid_start_date() {
        let mut plot = two_step_plot();
        plot.header.month = 13;
        let series = convert(&plot, &ConvertOptions::default()).unwrap();
        let err = SummaryCase::new("X", &plot, &series).unwrap_err();
        assert!(matches!(err, PlotError::InvalidStartDate { month: 13, .. }));
    }

    #[test]
    fn test_json_writer() {
        let plot = two_step_plot();
        let series = convert(&plot, &ConvertOptions::default()).unwrap();
        let case = SummaryCase::new("ECL_CASE", &plot, &series).unwrap();

        let mut writer = JsonSummaryWriter::new(Vec::new());
        writer.write(&case).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(json["case"], "ECL_CASE");
        assert_eq!(json["start_date"], "1980-01-01");
        assert_eq!(json["keywords"][1]["keyword"], "FWCT");
        assert_eq!(json["keywords"][1]["unit"], "SM3/SM3");
        assert_eq!(json["steps"][0]["values"][0], 12.5);
    }
}

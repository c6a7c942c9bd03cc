// Unit systems reported by the simulator

use crate::core::error::{PlotError, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    English,
    Metric,
    MetricKgCm2,
    MetricBars,
    Lab,
}

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::English,
        UnitType::Metric,
        UnitType::MetricKgCm2,
        UnitType::MetricBars,
        UnitType::Lab,
    ];

    /// The 6-byte tag written in the plot header.
    pub fn tag(self) -> &'static [u8; 6] {
        match self {
            UnitType::English => b"ENGLIS",
            UnitType::Metric => b"METRIC",
            UnitType::MetricKgCm2 => b"METKG ",
            UnitType::MetricBars => b"METBAR",
            UnitType::Lab => b"LAB   ",
        }
    }

    pub fn from_tag(tag: &[u8; 6]) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitType::English => "english",
            UnitType::Metric => "metric",
            UnitType::MetricKgCm2 => "metric-kg/cm2",
            UnitType::MetricBars => "metric-bars",
            UnitType::Lab => "lab",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Compressibility,
    Density,
    FormationVolumeFactorGas,
    FormationVolumeFactorOil,
    Fraction,
    GasLiquidRatio,
    Length,
    Moles,
    Permeability,
    Pressure,
    PressureAbsolute,
    ReservoirRates,
    ReservoirVolumes,
    SurfaceRatesGas,
    SurfaceRatesLiquid,
    SurfaceVolumesGas,
    SurfaceVolumesLiquid,
    Temperature,
    Time,
    Viscosity,
    Volume,
    WaterCut,
}

impl Measure {
    pub const ALL: [Measure; 22] = [
        Measure::Compressibility,
        Measure::Density,
        Measure::FormationVolumeFactorGas,
        Measure::FormationVolumeFactorOil,
        Measure::Fraction,
        Measure::GasLiquidRatio,
        Measure::Length,
        Measure::Moles,
        Measure::Permeability,
        Measure::Pressure,
        Measure::PressureAbsolute,
        Measure::ReservoirRates,
        Measure::ReservoirVolumes,
        Measure::SurfaceRatesGas,
        Measure::SurfaceRatesLiquid,
        Measure::SurfaceVolumesGas,
        Measure::SurfaceVolumesLiquid,
        Measure::Temperature,
        Measure::Time,
        Measure::Viscosity,
        Measure::Volume,
        Measure::WaterCut,
    ];

    /// The measure of a plot variable code, trailing padding ignored.
    pub fn of_variable(code: &str) -> Option<Self> {
        let measure = match code.trim_end() {
            "QOP" | "QWP" | "QWI" | "QLP" | "QPP" => Measure::SurfaceRatesLiquid,
            "QGP" | "QGI" => Measure::SurfaceRatesGas,
            "COP" | "CWP" | "CWI" | "CLP" | "CPP" => Measure::SurfaceVolumesLiquid,
            "CGP" | "CGI" => Measure::SurfaceVolumesGas,
            "GOR" | "GLR" => Measure::GasLiquidRatio,
            "WCUT" | "WOR" => Measure::WaterCut,
            "BHP" | "THP" | "PRES" => Measure::Pressure,
            "TEMP" => Measure::Temperature,
            "QRP" | "QRI" => Measure::ReservoirRates,
            "CRP" | "CRI" => Measure::ReservoirVolumes,
            "OGR" => Measure::Fraction,
            _ => return None,
        };
        Some(measure)
    }
}

// Columns follow Measure::ALL
const ENGLISH: [&str; 22] = [
    "PSI-1", "LB/FT3", "RB/MSCF", "RB/STB", "", "MSCF/STB", "FT", "LB-M", "MD", "PSI", "PSIA",
    "RB/DAY", "kRB", "MSCF/DAY", "STB/DAY", "MMSCF", "kSTB", "F", "DAY", "CP", "FT3", "STB/STB",
];

const METRIC: [&str; 22] = [
    "KPA-1", "KG/M3", "RM3/SM3", "RM3/SM3", "", "SM3/SM3", "M", "KG-M", "MD", "KPA", "KPAA",
    "RM3/DAY", "kRM3", "SM3/DAY", "SM3/DAY", "kSM3", "kSM3", "C", "DAY", "CP", "M3", "SM3/SM3",
];

const METRIC_KG_CM2: [&str; 22] = [
    "(KG/CM2)-1", "KG/M3", "RM3/SM3", "RM3/SM3", "", "SM3/SM3", "M", "KG-M", "MD", "KG/CM2",
    "KG/CM2A", "RM3/DAY", "kRM3", "SM3/DAY", "SM3/DAY", "kSM3", "kSM3", "C", "DAY", "CP", "M3",
    "SM3/SM3",
];

const METRIC_BARS: [&str; 22] = [
    "BARS-1", "KG/M3", "RM3/SM3", "RM3/SM3", "", "SM3/SM3", "M", "KG-M", "MD", "BARS", "BARSA",
    "RM3/DAY", "kRM3", "SM3/DAY", "SM3/DAY", "kSM3", "kSM3", "C", "DAY", "CP", "M3", "SM3/SM3",
];

const LAB: [&str; 22] = [
    "PSI-1", "GM/CC", "CC/CC", "CC/CC", "", "CC/CC", "CM", "GM-M", "MD", "PSI", "PSIA", "CC/HR",
    "CC", "CC/HR", "CC/HR", "CC", "CC", "C", "HR", "CP", "CC", "CC/CC",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSystem {
    unit_type: UnitType,
}

impl UnitSystem {
    pub fn new(unit_type: UnitType) -> Self {
        Self { unit_type }
    }

    pub fn from_tag(tag: &[u8; 6]) -> Result<Self> {
        UnitType::from_tag(tag).map(Self::new).ok_or_else(|| {
            PlotError::UnrecognizedUnitSystem(String::from_utf8_lossy(tag).into_owned())
        })
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn unit_str(&self, measure: Measure) -> &'static str {
        let table = match self.unit_type {
            UnitType::English => &ENGLISH,
            UnitType::Metric => &METRIC,
            UnitType::MetricKgCm2 => &METRIC_KG_CM2,
            UnitType::MetricBars => &METRIC_BARS,
            UnitType::Lab => &LAB,
        };
        table[measure as usize]
    }

    pub fn variable_unit_str(&self, code: &str) -> Result<&'static str> {
        Measure::of_variable(code)
            .map(|m| self.unit_str(m))
            .ok_or_else(|| PlotError::UnknownVariable(code.trim_end().to_string()))
    }
}

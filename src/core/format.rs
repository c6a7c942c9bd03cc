// Data structures for Nexus plot files

use crate::core::constants::HEADER_FIELD_COUNT;
use crate::core::token::{ClassName, InstanceName, VariableCode};
use crate::core::units::UnitSystem;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub unit_system: UnitSystem,
    pub num_classes: i32,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub nx: i32,
    pub ny: i32,
    pub nz: i32,
    pub ncomp: i32,
}

impl Header {
    pub fn from_fields(unit_system: UnitSystem, fields: [i32; HEADER_FIELD_COUNT]) -> Self {
        let [num_classes, day, month, year, nx, ny, nz, ncomp] = fields;
        Self {
            unit_system,
            num_classes,
            day,
            month,
            year,
            nx,
            ny,
            nz,
            ncomp,
        }
    }

    /// The header integers in file order.
    pub fn fields(&self) -> [i32; HEADER_FIELD_COUNT] {
        [
            self.num_classes,
            self.day,
            self.month,
            self.year,
            self.nx,
            self.ny,
            self.nz,
            self.ncomp,
        ]
    }
}

/// Class name to the ordered variable codes of that class. The order
/// defines how each instance's value array maps onto variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableCatalog {
    classes: Vec<ClassName>,
    variables: HashMap<ClassName, Vec<VariableCode>>,
}

impl VariableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. A repeated class name replaces the earlier list but
    /// keeps its original position.
    pub fn insert(&mut self, class: ClassName, codes: Vec<VariableCode>) {
        if self.variables.insert(class, codes).is_none() {
            self.classes.push(class);
        }
    }

    pub fn variables(&self, class: &ClassName) -> Option<&[VariableCode]> {
        self.variables.get(class).map(Vec::as_slice)
    }

    pub fn classes(&self) -> &[ClassName] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestep: i32,
    pub time: f32,
    pub max_perfs: i32,
    pub class: ClassName,
    pub instance: InstanceName,
    pub variable: VariableCode,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub header: Header,
    pub catalog: VariableCatalog,
    pub samples: Vec<Sample>,
}

impl Plot {
    pub fn classes(&self) -> &[ClassName] {
        self.catalog.classes()
    }

    pub fn variables(&self, class: &str) -> Vec<VariableCode> {
        self.catalog
            .variables(&ClassName::padded(class))
            .map(<[VariableCode]>::to_vec)
            .unwrap_or_default()
    }

    /// Instances of `class` in order of first appearance.
    pub fn instances(&self, class: &str) -> Vec<InstanceName> {
        let mut out: Vec<InstanceName> = Vec::new();
        for sample in self.samples.iter().filter(|s| s.class.matches(class)) {
            if !out.contains(&sample.instance) {
                out.push(sample.instance);
            }
        }
        out
    }

    /// Unique timestep indices, ascending.
    pub fn timesteps(&self) -> Vec<i32> {
        let mut steps: Vec<i32> = self.samples.iter().map(|s| s.timestep).collect();
        steps.sort_unstable();
        steps.dedup();
        steps
    }

    /// Samples matching every given name, in file order.
    pub fn samples_where<'a>(
        &'a self,
        class: Option<&'a str>,
        instance: Option<&'a str>,
        variable: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples.iter().filter(move |s| {
            class.map_or(true, |c| s.class.matches(c))
                && instance.map_or(true, |i| s.instance.matches(i))
                && variable.map_or(true, |v| s.variable.matches(v))
        })
    }
}

// Synthesizes plot byte streams for tests

use crate::core::constants::*;

pub const HEADER_SIZE: usize = 4 + 12 + 6 * 4 + 6 + 794 + 32;
pub const HEADER_FIELDS_OFFSET: usize = HEADER_SIZE - 32;

pub struct Block {
    pub class: String,
    pub timestep: f32,
    pub time: f32,
    pub max_perfs: f32,
    pub items: Vec<(String, Vec<f32>)>,
}

impl Block {
    pub fn new(class: &str, timestep: i32, time: f32) -> Self {
        Self {
            class: class.to_string(),
            timestep: timestep as f32,
            time,
            max_perfs: 0.0,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, instance: &str, values: &[f32]) -> Self {
        self.items.push((instance.to_string(), values.to_vec()));
        self
    }
}

pub struct PlotBuilder {
    pub unit_tag: [u8; 6],
    pub fields: [i32; 8],
    pub classes: Vec<(String, Vec<String>)>,
    pub blocks: Vec<Block>,
}

fn padded<const N: usize>(name: &str) -> [u8; N] {
    let mut out = [b' '; N];
    for (dst, src) in out.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    out
}

impl PlotBuilder {
    pub fn new(unit_tag: &[u8; 6]) -> Self {
        Self {
            unit_tag: *unit_tag,
            fields: [0, 1, 1, 1980, 10, 10, 3, 0],
            classes: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn class(mut self, name: &str, codes: &[&str]) -> Self {
        self.classes
            .push((name.to_string(), codes.iter().map(|c| c.to_string()).collect()));
        self.fields[0] = self.classes.len() as i32;
        self
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Header, catalog and blocks, without the STOP sentinel.
    pub fn build_unterminated(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(TYPE_TAG);
        out.extend_from_slice(b"2.0   NEXUS 5000  0001  ");
        out.extend_from_slice(&self.unit_tag);
        out.extend_from_slice(&[0u8; 794]);
        for f in self.fields {
            out.extend_from_slice(&f.to_be_bytes());
        }

        out.extend_from_slice(&[0u8; 8]);
        for (name, _) in &self.classes {
            out.extend_from_slice(&padded::<8>(name));
        }
        out.extend_from_slice(&[0u8; 8]);
        for (_, codes) in &self.classes {
            out.extend_from_slice(&(codes.len() as i32).to_be_bytes());
        }
        out.extend_from_slice(&[0u8; 8]);
        for (_, codes) in &self.classes {
            out.extend_from_slice(b"TIME");
            for code in codes {
                out.extend_from_slice(&padded::<4>(code));
            }
            out.extend_from_slice(&[0u8; 8]);
        }

        for block in &self.blocks {
            out.extend_from_slice(&padded::<8>(&block.class));
            out.extend_from_slice(&[0u8; 8]);
            let words = [
                block.timestep,
                block.time,
                block.items.len() as f32,
                block.items.len() as f32,
                block.max_perfs,
            ];
            for w in words {
                out.extend_from_slice(&w.to_bits().to_be_bytes());
            }
            for (instance, values) in &block.items {
                out.extend_from_slice(&[0u8; 8]);
                out.extend_from_slice(&padded::<8>(instance));
                out.extend_from_slice(&[0u8; 64]);
                for v in values {
                    out.extend_from_slice(&v.to_bits().to_be_bytes());
                }
            }
            out.extend_from_slice(&[0u8; 8]);
        }
        out
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.build_unterminated();
        out.extend_from_slice(STOP_TAG.as_bytes());
        out
    }
}

/// The two-variable FIELD/NETWORK plot used across converter tests.
pub fn field_plot() -> PlotBuilder {
    PlotBuilder::new(b"METBAR")
        .class("FIELD", &["QOP", "WCUT"])
        .block(Block::new("FIELD", 1, 0.0).item("NETWORK", &[12.5, 0.3]))
}

// Nexus plot decoder: header, variable catalog, then the record stream

use crate::core::compression::open_plot_file;
use crate::core::constants::*;
use crate::core::error::{PlotError, Result};
use crate::core::format::*;
use crate::core::stream::PlotStream;
use crate::core::token::{ClassName, InstanceName, VariableCode};
use crate::core::units::UnitSystem;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Opens and decodes a plot file, decompressing by extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Plot> {
    let path = path.as_ref();
    let reader = open_plot_file(path)?;
    let plot = load_from(reader)?;
    info!(
        "Loaded {}: {} classes, {} samples",
        path.display(),
        plot.catalog.len(),
        plot.samples.len()
    );
    Ok(plot)
}

/// Decodes a plot from a stream positioned at its first byte.
pub fn load_from<R: Read>(reader: R) -> Result<Plot> {
    let mut stream = PlotStream::new(reader);
    let header = read_header(&mut stream)?;
    let catalog = read_catalog(&mut stream, header.num_classes)?;
    let samples = read_records(&mut stream, &catalog)?;
    Ok(Plot {
        header,
        catalog,
        samples,
    })
}

pub fn read_header<R: Read>(stream: &mut PlotStream<R>) -> Result<Header> {
    let tag = stream
        .skip(HEADER_PREFIX_SIZE, "file prefix")
        .and_then(|_| stream.read_token::<12>("type tag"))
        .map_err(|_| PlotError::BadHeader("could not verify file type".to_string()))?;
    if tag.as_bytes() != TYPE_TAG {
        return Err(PlotError::BadHeader(format!(
            "could not verify file type, found {:?}",
            tag
        )));
    }

    // plot file version, simulator, simulator version x2
    for _ in 0..HEADER_BLOB_COUNT {
        stream.skip(HEADER_BLOB_SIZE, "version block")?;
    }

    let unit_tag = stream.read_token::<UNIT_TAG_SIZE>("unit system")?;
    let unit_system = UnitSystem::from_tag(unit_tag.as_bytes())?;

    stream.skip(HEADER_PADDING_SIZE, "header padding")?;

    let fields = stream.read_i32s::<HEADER_FIELD_COUNT>("header fields")?;
    if let Some(v) = fields.iter().find(|v| **v < 0) {
        return Err(PlotError::BadHeader(format!(
            "negative header field {}, corrupted file",
            v
        )));
    }

    let header = Header::from_fields(unit_system, fields);
    debug!(
        "Header: unit system {}, {} classes, grid {}x{}x{}",
        unit_system.unit_type(),
        header.num_classes,
        header.nx,
        header.ny,
        header.nz
    );
    Ok(header)
}

pub fn read_catalog<R: Read>(
    stream: &mut PlotStream<R>,
    num_classes: i32,
) -> Result<VariableCatalog> {
    let num_classes = usize::try_from(num_classes)
        .map_err(|_| PlotError::BadHeader(format!("negative class count {}", num_classes)))?;

    stream.skip(SEPARATOR_SIZE, "separator")?;
    // counts come from the file; grow only as bytes arrive
    let mut classes = Vec::new();
    for _ in 0..num_classes {
        classes.push(stream.read_token::<CLASS_NAME_SIZE>("class name")?);
    }

    stream.skip(SEPARATOR_SIZE, "separator")?;
    let mut counts = Vec::new();
    for word in stream.read_words(num_classes, "variable counts")? {
        let count = usize::try_from(word as i32).map_err(|_| {
            PlotError::BadHeader(format!("negative variable count {}", word as i32))
        })?;
        counts.push(count);
    }

    stream.skip(SEPARATOR_SIZE, "separator")?;
    let mut catalog = VariableCatalog::new();
    for (class, count) in classes.into_iter().zip(counts) {
        stream.skip(TIME_VARNAME_SIZE, "time variable name")?;
        let len = count as u64 * VARIABLE_CODE_SIZE as u64;
        let buf = stream.read_bytes(len, "variable codes")?;
        let codes: Vec<VariableCode> = buf
            .chunks_exact(VARIABLE_CODE_SIZE)
            .map(|c| VariableCode::new([c[0], c[1], c[2], c[3]]))
            .collect();
        stream.skip(SEPARATOR_SIZE, "separator")?;

        debug!("Class {}: {} variables", class, codes.len());
        catalog.insert(class, codes);
    }

    Ok(catalog)
}

pub fn read_records<R: Read>(
    stream: &mut PlotStream<R>,
    catalog: &VariableCatalog,
) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    loop {
        let class: ClassName = stream.read_token::<CLASS_NAME_SIZE>("class name")?;
        if class == STOP_TAG {
            debug!("Reached STOP at offset {}", stream.offset());
            return Ok(samples);
        }

        let variables = catalog.variables(&class).ok_or_else(|| {
            PlotError::BadHeader(format!(
                "unknown class {:?} at offset {}",
                class,
                stream.offset() - CLASS_NAME_SIZE as u64
            ))
        })?;

        stream.skip(SEPARATOR_SIZE, "separator")?;
        let [timestep, time, num_items, _max_items, max_perfs] =
            read_block_words(stream)?;
        let timestep = timestep as i32;
        let max_perfs = max_perfs as i32;
        let num_items = num_items as i32;
        if num_items < 0 {
            return Err(PlotError::BadHeader(format!(
                "negative item count {} in {} block",
                num_items, class
            )));
        }

        for _ in 0..num_items {
            stream.skip(SEPARATOR_SIZE, "separator")?;
            let instance: InstanceName = stream.read_token::<CLASS_NAME_SIZE>("instance name")?;
            stream.skip(ITEM_PADDING_SIZE, "item padding")?;
            let values = stream.read_f32s(variables.len(), "values")?;

            samples.extend(variables.iter().zip(values).map(|(variable, value)| Sample {
                timestep,
                time,
                max_perfs,
                class,
                instance,
                variable: *variable,
                value,
            }));
        }

        stream.skip(SEPARATOR_SIZE, "separator")?;
    }
}

fn read_block_words<R: Read>(stream: &mut PlotStream<R>) -> Result<[f32; BLOCK_WORD_COUNT]> {
    let values = stream.read_f32s(BLOCK_WORD_COUNT, "block header")?;
    let mut out = [0f32; BLOCK_WORD_COUNT];
    out.copy_from_slice(&values);
    Ok(out)
}

// Example usage of the Nexus plot reader: decode, convert, write JSON summary

use nexus_plot::{
    convert, load, ConvertOptions, JsonSummaryWriter, Result, SummaryCase, SummaryWriter,
};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "data/SPE1.plt".to_string());
    let case = args.next().unwrap_or_else(|| "ECL_CASE".to_string());

    let plot = load(&input)?;
    info!(
        "Unit system: {}, start {}/{}/{}, grid {}x{}x{}",
        plot.header.unit_system.unit_type(),
        plot.header.day,
        plot.header.month,
        plot.header.year,
        plot.header.nx,
        plot.header.ny,
        plot.header.nz
    );

    for class in plot.classes() {
        let variables: Vec<String> = plot
            .variables(&class.trimmed())
            .iter()
            .map(|v| v.trimmed())
            .collect();
        info!("  [{}] {}", class, variables.join(" "));
    }
    info!("Timesteps: {}", plot.timesteps().len());

    let series = convert(&plot, &ConvertOptions::default())?;
    for vector in &series.vectors {
        info!("{} [{}]: {} points", vector.keyword, vector.unit, vector.points.len());
    }
    for code in &series.skipped {
        warn!("Not converted: {}", code);
    }

    let summary = SummaryCase::new(&case, &plot, &series)?;
    let out = File::create(format!("{}.json", case))?;
    JsonSummaryWriter::new(BufWriter::new(out)).write(&summary)?;
    info!("Wrote {}.json", case);

    Ok(())
}

use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Parser;
use log::{info, warn};

use ocean_floor::{read_segments, DiagonalPolicy, Diagram, LineGridAccumulator};

/// Count the points where hydrothermal vent lines overlap.
#[derive(Parser, Debug)]
#[command(name = "ocean-floor", version, about, long_about = None)]
struct Args {
    /// Input file with one `x1,y1 -> x2,y2` segment per line
    input: PathBuf,

    /// Minimum number of overlapping lines for a point to count
    #[arg(short, long, default_value_t = 2)]
    threshold: u32,

    /// Print the overlap diagram for each part
    #[arg(short, long, default_value_t = false)]
    diagram: bool,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    info!("reading segments from {}", args.input.display());
    let segments = read_segments(BufReader::new(File::open(&args.input)?))
        .collect::<Result<Vec<_>, _>>()?;

    let parts = [
        ("horizontal and vertical", DiagonalPolicy::orthogonal_only()),
        ("with 45 degree diagonals", DiagonalPolicy::with_45_diagonals()),
    ];
    for (part, (label, policy)) in parts.into_iter().enumerate() {
        let mut accumulator = LineGridAccumulator::new(policy);
        accumulator.extend(segments.iter().copied());
        info!(
            "part {}: {} points visited, max overlap {}",
            part + 1,
            accumulator.len(),
            accumulator.max_overlap()
        );
        if args.diagram {
            match Diagram::from_overlaps(accumulator.overlaps()) {
                Ok(diagram) => print!("{diagram}"),
                Err(err) => warn!("skipping diagram for part {}: {err}", part + 1),
            }
        }
        println!(
            "part {} ({label}): {}",
            part + 1,
            accumulator.count_at_or_above(args.threshold)
        );
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecgrate_lib::{
    analyze_record, analyze_record_detailed,
    io::annotations::{parse_annotations, ParsedAnnotations},
};
use log::{info, warn};
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "ecgrate",
    version,
    about = "Heart-rate statistics from delineated ECG annotation records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute mean/min/max heart rate from a wave_type,onset,offset[,tags] CSV (stdin or --input)
    Analyze {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Pretty-print the JSON summary
        #[arg(long)]
        pretty: bool,
    },
    /// Print parsed annotation rows as JSON lines; skipped lines go to stderr
    Annotations {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the R-R intervals that survive outlier rejection, with z-score and BPM
    Intervals {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { input, pretty } => cmd_analyze(input.as_deref(), pretty)?,
        Commands::Annotations { input } => cmd_annotations(input.as_deref())?,
        Commands::Intervals { input } => cmd_intervals(input.as_deref())?,
    }
    Ok(())
}

fn open_input(input: Option<&Path>) -> Result<Box<dyn Read>> {
    match input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin())),
    }
}

fn report_skipped(annotations: &ParsedAnnotations) {
    for skipped in &annotations.skipped {
        warn!("skipped line {}: {:?}", skipped.line, skipped.reason);
    }
}

fn cmd_analyze(input: Option<&Path>, pretty: bool) -> Result<()> {
    let summary = analyze_record(open_input(input)?).context("analyzing annotation record")?;
    let js = if pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{}", js);
    Ok(())
}

fn cmd_annotations(input: Option<&Path>) -> Result<()> {
    let annotations = parse_annotations(open_input(input)?)?;
    report_skipped(&annotations);
    for row in &annotations.rows {
        println!("{}", serde_json::to_string(row)?);
    }
    for skipped in &annotations.skipped {
        eprintln!("{}", serde_json::to_string(skipped)?);
    }
    Ok(())
}

fn cmd_intervals(input: Option<&Path>) -> Result<()> {
    let analysis =
        analyze_record_detailed(open_input(input)?).context("analyzing annotation record")?;
    report_skipped(&analysis.annotations);
    info!(
        "{} QRS beats, {} intervals, {} kept",
        analysis.beat_count,
        analysis.intervals.len(),
        analysis.samples.len()
    );
    for sample in &analysis.samples {
        println!("{}", serde_json::to_string(sample)?);
    }
    Ok(())
}

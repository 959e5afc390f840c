//! Replay recorded pose keypoints through the sitting engine and report the
//! unique sitting count.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sitcount_rs::{EngineConfig, SittingEngine, integration::JsonLinesSource};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines keypoint recording, one frame per line ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    input: String,

    /// TOML engine configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of consecutive sitting frames needed to count someone
    #[arg(long, value_name = "FRAMES")]
    confirmation_frames: Option<u32>,

    /// Log progress every N frames (0 disables)
    #[arg(long, default_value_t = 100, value_name = "FRAMES")]
    progress_every: u32,

    /// Print every frame report as a JSON line on stdout
    #[arg(long)]
    report: bool,
}

fn open_input(input: &str) -> Result<Box<dyn BufRead>> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(input).with_context(|| format!("cannot open input {input}"))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(frames) = args.confirmation_frames {
        config.confirmation_frames = frames;
    }

    info!(input = %args.input, ?config, "starting replay");
    let mut engine = SittingEngine::try_new(config)?;
    let source = JsonLinesSource::new(open_input(&args.input)?);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for frame in source {
        let detections = frame?;
        let report = engine.process_frame(&detections);

        if args.report {
            serde_json::to_writer(&mut out, &report)?;
            writeln!(out)?;
        }
        if args.progress_every > 0 && report.frame_id % args.progress_every == 0 {
            info!(
                "Frames processed: {}. Current Count: {}",
                report.frame_id, report.unique_count
            );
        }
    }

    info!(frames = engine.frame_index(), "analysis complete");
    writeln!(out, "Total unique people seen sitting: {}", engine.unique_count())?;

    Ok(())
}

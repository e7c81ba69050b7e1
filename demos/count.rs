//! Replays a detection dump through a counting session.
//!
//! Every dump line is `<timestamp>:<json array of {"x","y","w","h"}>`, one
//! line per video frame, as written by the detection stage.

use anyhow::Context;
use clap::Parser;
use linecount::{Config, Frame, FrameReport, Session};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "count", about = "Count objects crossing a line in a detection dump")]
struct Args {
    /// Detection dump, one frame per line
    input: PathBuf,
    /// JSON config file, flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_disappear: Option<u32>,
    /// Y coordinate of a horizontal counting line
    #[arg(long)]
    line_y: Option<i32>,
    #[arg(long)]
    skip_frames: Option<u32>,
    /// Write one JSON report per processed frame here
    #[arg(long)]
    reports: Option<PathBuf>,
    /// Print the tracks of every processed frame
    #[arg(long)]
    verbose: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(max_disappear) = args.max_disappear {
        config.max_disappear = max_disappear;
    }

    if let Some(y) = args.line_y {
        config.line = linecount::Line::horizontal(y);
    }

    if let Some(skip) = args.skip_frames {
        config.skip_frames = skip;
    }

    config.validate()?;

    Ok(config)
}

fn print_report(report: &FrameReport) {
    for obj in &report.objects {
        println!(
            "{} {} {} {} {}",
            report.frame, obj.id.0, obj.x, obj.y, report.timestamp
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!("config: {:?}", config);

    let dets_file = std::fs::File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let mut reports = match &args.reports {
        Some(path) => Some(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => None,
    };

    let mut session = Session::new(config);

    for (lineno, line) in std::io::BufReader::new(dets_file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame: Frame = line
            .parse()
            .with_context(|| format!("line {}", lineno + 1))?;

        let report = match session.process(&frame)? {
            Some(report) => report,
            None => continue,
        };

        if args.verbose {
            print_report(&report);
        }

        if let Some(out) = reports.as_mut() {
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    if let Some(out) = reports.as_mut() {
        out.flush()?;
    }

    println!(
        "Count: {} ({} frames)",
        session.total(),
        session.frame_count()
    );

    Ok(())
}

//! karita-bench: CLI tool for survey parameter experimentation and
//! diagnostics.
//!
//! Runs the grid pipeline on a given survey plan file with optional
//! parameter overrides, printing detailed per-stage diagnostics.
//! Useful for:
//!
//! - Tuning spacing, angle, and turnaround distance for a field
//! - Measuring per-stage durations on large polygons
//! - Understanding how parameter changes affect chord/point counts
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin karita-bench -- [OPTIONS] <PLAN_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use karita_export::{SurveyPlan, SvgMetadata};
use karita_grid::diagnostics::{Clock, SurveyDiagnostics, plan_with_diagnostics};

/// Survey parameter experimentation and diagnostics for karita.
///
/// Loads a survey plan document, runs the grid pipeline with optional
/// parameter overrides, and prints per-stage timing and count
/// diagnostics.
#[derive(Parser)]
#[command(name = "karita-bench", version)]
struct Cli {
    /// Path to the survey plan JSON document.
    plan_path: PathBuf,

    /// Override the sweep angle in degrees.
    #[arg(long)]
    angle: Option<f64>,

    /// Override the pass spacing in metres.
    #[arg(long)]
    spacing: Option<f64>,

    /// Override the turnaround distance in metres.
    #[arg(long)]
    turnaround: Option<f64>,

    /// Override the camera trigger distance in metres.
    #[arg(long)]
    trigger_distance: Option<f64>,

    /// Write an SVG preview of the generated path to this file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let plan_json = match std::fs::read_to_string(&cli.plan_path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.plan_path.display());
            return ExitCode::FAILURE;
        }
    };

    let plan = match SurveyPlan::from_json(&plan_json) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", cli.plan_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut config = plan.survey_config();
    if let Some(angle) = cli.angle {
        config.grid.angle_degrees = angle;
    }
    if let Some(spacing) = cli.spacing {
        config.grid.spacing = spacing;
    }
    if let Some(turnaround) = cli.turnaround {
        config.grid.turnaround_distance = turnaround;
    }
    if let Some(trigger_distance) = cli.trigger_distance {
        config.trigger_distance = trigger_distance;
    }

    let polygon = plan.polygon_points();

    eprintln!(
        "Plan: {} ({} vertices)",
        cli.plan_path.display(),
        polygon.len(),
    );
    eprintln!("Config: {config:#?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        let (result, diagnostics) = plan_with_diagnostics(&polygon, &config, &StdClock);

        if cli.json {
            match serde_json::to_string_pretty(&diagnostics) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error serializing diagnostics: {e}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!("{}", diagnostics.report());
        }

        // Write the SVG preview on the first run only.
        if run == 0
            && let Some(ref svg_path) = cli.svg
        {
            let staged = karita_grid::plan_staged(&polygon, &config);
            let title = cli
                .plan_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("survey");
            let desc = format!(
                "spacing={} angle={} turnaround={}",
                config.grid.spacing, config.grid.angle_degrees, config.grid.turnaround_distance,
            );
            let metadata = SvgMetadata {
                title: Some(title),
                description: Some(&desc),
            };
            let svg = karita_export::to_svg(&staged, &metadata);
            match std::fs::write(svg_path, &svg) {
                Ok(()) => {
                    eprintln!(
                        "SVG written to {} ({} bytes, {} waypoints)",
                        svg_path.display(),
                        svg.len(),
                        result.path.len(),
                    );
                }
                Err(e) => {
                    eprintln!("Error writing SVG to {}: {e}", svg_path.display());
                }
            }
        }

        all_diagnostics.push(diagnostics);

        if cli.runs > 1 {
            eprintln!();
        }
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[SurveyDiagnostics]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    println!();
    println!("{:<14} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(28));

    type StageExtractor = fn(&SurveyDiagnostics) -> Duration;
    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("Projection", |d| d.projection.duration),
        ("Bounds", |d| d.bounds.duration),
        ("Sweep", |d| d.sweep.duration),
        ("Clip", |d| d.clip.duration),
        ("Normalize", |d| d.normalize.duration),
        ("Stitch", |d| d.stitch.duration),
        ("Metrics", |d| d.metrics.duration),
    ];

    for (name, extractor) in stage_extractors {
        let stage_mean = all_diagnostics
            .iter()
            .map(|d| extractor(d).as_secs_f64() * 1000.0)
            .sum::<f64>()
            / all_diagnostics.len() as f64;
        println!("{name:<14} {stage_mean:>10.3}ms");
    }
}

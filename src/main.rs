use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use serde_json::json;

use facetrack_rs::{
    ConfigError, DetectionBuilder, MatchPolicy, Rect, TrackRegistry, TrackerConfig,
};

/// Replay recorded face detections through the persistence tracker.
///
/// INPUT holds one sampling round per line, each a JSON array of
/// `[x, y, width, height]` boxes. One JSON line per round is written to stdout.
#[derive(Parser)]
#[command(name = "facetrack")]
struct Cli {
    /// JSON-lines file of detection batches.
    input: PathBuf,

    /// JSON file with tracker settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Downscale factor the detector ran at (boxes are divided by it).
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// IoU that must be exceeded to continue a track.
    #[arg(long)]
    threshold: Option<f32>,

    /// Rounds a box must survive before it is rendered (count must exceed this).
    #[arg(long)]
    min_persistence: Option<u32>,

    /// Matching strategy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    FirstMatch,
    Optimal,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstMatch => MatchPolicy::FirstMatch,
            PolicyArg::Optimal => MatchPolicy::Optimal,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    if !(cli.scale.is_finite() && cli.scale > 0.0) {
        return Err(ConfigError::NonPositiveScale(cli.scale).into());
    }

    let reader = BufReader::new(File::open(&cli.input)?);
    let mut out = BufWriter::new(io::stdout().lock());
    let mut registry = TrackRegistry::new(config)?;
    let mut max_rendered = 0;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let detections = parse_batch(&line, cli.scale)
            .map_err(|e| format!("{}:{}: {e}", cli.input.display(), lineno + 1))?;
        let rendered = registry.update(&detections)?;
        max_rendered = max_rendered.max(rendered.len());

        let entries: Vec<_> = registry
            .entries()
            .iter()
            .map(|e| json!({ "box": e.rect.to_tlwh(), "count": e.count }))
            .collect();
        let rendered: Vec<[f32; 4]> = rendered.iter().map(Rect::to_tlwh).collect();
        let record = json!({
            "round": registry.round(),
            "entries": entries,
            "rendered": rendered,
        });
        writeln!(out, "{record}")?;
    }
    out.flush()?;

    log::info!(
        "replayed {} rounds, at most {} boxes rendered at once",
        registry.round(),
        max_rendered
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TrackerConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.match_threshold = threshold;
    }
    if let Some(min_persistence) = cli.min_persistence {
        config.min_persistence = min_persistence;
    }
    if let Some(policy) = cli.policy {
        config.policy = policy.into();
    }
    config.validate()?;
    log::debug!("tracker config: {config:?}");
    Ok(config)
}

fn load_config(path: &Path) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn parse_batch(line: &str, scale: f32) -> Result<Vec<Rect>, Box<dyn std::error::Error>> {
    let raw: Vec<[f32; 4]> = serde_json::from_str(line)?;
    let mut batch = Vec::with_capacity(raw.len());
    for [x, y, w, h] in raw {
        batch.push(DetectionBuilder::new().tlwh(x, y, w, h).downscale(scale)?.build()?);
    }
    Ok(batch)
}

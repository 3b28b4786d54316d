mod export;
mod renderer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use evstory_core::parsers::load_dataset;
use evstory_core::{Scene, Story, StoryConfig};
use evstory_protocol::Canvas;
use tracing_subscriber::EnvFilter;

/// Explore historical EV sales: a global trend, a top-countries ranking and
/// a per-country view, in the terminal or exported as SVG.
#[derive(Debug, Parser)]
#[command(name = "evstory", version)]
struct Cli {
    /// Sales CSV (IEA Global EV Outlook historical export).
    data: PathBuf,

    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Year to preselect.
    #[arg(long)]
    year: Option<i32>,

    /// Scene to open on: 0 trend, 1 ranking, 2 exploration.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    scene: Option<u8>,

    /// Region excluded from country comparisons (repeatable). Replaces the
    /// default aggregate list.
    #[arg(long = "exclude", value_name = "REGION")]
    excluded: Vec<String>,

    /// Canvas size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_canvas)]
    canvas: Option<Canvas>,

    /// Use the dark palette for SVG export.
    #[arg(long)]
    dark: bool,

    /// Write one SVG per scene into this directory instead of starting
    /// the terminal UI.
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Append logs to this file. Without it the terminal UI logs nothing.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_canvas(s: &str) -> Result<Canvas, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let height: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok(Canvas::new(width, height))
}

impl Cli {
    fn story_config(&self) -> Result<StoryConfig> {
        let mut config = match &self.config {
            Some(path) => StoryConfig::load(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
            None => StoryConfig::default(),
        };
        if let Some(year) = self.year {
            config.initial_year = year;
        }
        if !self.excluded.is_empty() {
            config.excluded_regions = self.excluded.clone();
        }
        if let Some(canvas) = self.canvas {
            config.canvas = canvas;
        }
        if self.dark {
            config.dark = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let default_level = match cli.export {
        Some(_) => "info",
        None => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match (&cli.log_file, &cli.export) {
        (Some(path), _) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        // Export runs are not interactive, so stderr is free.
        (None, Some(_)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // Log output would tear through the alternate screen.
        (None, None) => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = cli.story_config()?;
    let dataset = load_dataset(&cli.data, &config)
        .with_context(|| format!("failed to load dataset '{}'", cli.data.display()))?;
    tracing::info!(
        records = dataset.len(),
        years = ?dataset.years(),
        "dataset ready"
    );

    let mut story = Story::new(Arc::new(dataset), config);
    if let Some(scene) = cli.scene.and_then(|i| Scene::from_index(usize::from(i))) {
        story.select_scene(scene);
    }

    match &cli.export {
        Some(dir) => {
            let written = export::export_scenes(&mut story, dir)?;
            for path in written {
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
        None => renderer::run_tui(&mut story),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "evstory",
            "sales.csv",
            "--year",
            "2021",
            "--exclude",
            "World",
            "--exclude",
            "Europe",
            "--canvas",
            "1200x600",
            "--scene",
            "2",
        ]);
        let config = cli.story_config().unwrap();
        assert_eq!(config.initial_year, 2021);
        assert_eq!(config.excluded_regions, vec!["World", "Europe"]);
        assert_eq!(config.canvas, Canvas::new(1200.0, 600.0));
        assert_eq!(cli.scene, Some(2));
        assert_eq!(config.top_n, 15);
    }

    #[test]
    fn rejects_out_of_range_scene() {
        let parsed = Cli::try_parse_from(["evstory", "sales.csv", "--scene", "3"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn canvas_parsing() {
        assert_eq!(parse_canvas("900x500"), Ok(Canvas::new(900.0, 500.0)));
        assert!(parse_canvas("900").is_err());
        assert!(parse_canvas("ax5").is_err());
    }

    #[test]
    fn zero_canvas_fails_validation() {
        let cli = Cli::parse_from(["evstory", "sales.csv", "--canvas", "0x500"]);
        assert!(cli.story_config().is_err());
    }
}

//! Commons Curve - trading-card CSV analysis & chart generation
//!
//! Loads one card CSV, derives effect-category flags, aggregates per color
//! identity, and renders a six-panel figure of creature mana-value curves.

use anyhow::{Context, Result};
use clap::Parser;
use commons_curve::charts::CurveFigure;
use commons_curve::data::{normalize_colors, CardLoader, TagRules};
use commons_curve::stats::{summarize_color, ColorFilter};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commons-curve")]
#[command(about = "Analyze common-card distribution per color from a card CSV")]
struct Cli {
    /// Input CSV file
    #[arg(short, long, default_value = "scryfall_commons.csv")]
    input: PathBuf,

    /// Output chart image (PNG)
    #[arg(short, long, default_value = "commons_curve.png")]
    output: PathBuf,

    /// Optional JSON dump of the per-color summaries
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(long, default_value = "1800")]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value = "1200")]
    height: u32,

    /// Figure title
    #[arg(long, default_value = "Distribution of Common Cards in an Average Set")]
    title: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut loader = CardLoader::new();
    loader
        .load_csv(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    let mut cards = loader.extract_cards()?;
    log::info!("Loaded {} cards from {}", cards.len(), cli.input.display());

    normalize_colors(&mut cards);
    let rules = TagRules::default();
    rules.tag_cards(&mut cards);

    let summaries: Vec<_> = ColorFilter::ALL
        .iter()
        .map(|&color| summarize_color(&cards, color))
        .collect();

    let figure = CurveFigure::new(cli.width, cli.height, &cli.title);
    figure
        .render(&summaries, &cli.output)
        .with_context(|| format!("Failed to render {}", cli.output.display()))?;
    log::info!("Wrote figure to {}", cli.output.display());

    if let Some(path) = &cli.summary_out {
        let json = serde_json::to_string_pretty(&summaries)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote summary to {}", path.display());
    }

    Ok(())
}

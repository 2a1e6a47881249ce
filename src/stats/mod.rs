//! Stats module - descriptive statistics and per-color aggregation

mod aggregator;
mod calculator;

pub use aggregator::{
    summarize_color, ColorFilter, ColorSummary, CurveBucket, TypeRatio, CARD_TYPES,
};
pub use calculator::{describe_counts, ratio, CountStats};

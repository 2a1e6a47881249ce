//! Data module - CSV loading and feature tagging

mod loader;
mod tagger;

pub use loader::{CardLoader, CardRecord, LoaderError, REQUIRED_COLUMNS};
pub use tagger::{normalize_color_identity, normalize_colors, TagRules, EVASION_KEYWORDS};

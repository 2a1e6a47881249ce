//! CSV Card Loader Module
//! Handles CSV loading, schema validation, and record extraction using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Columns the analysis cannot run without.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "set_name",
    "color_identity",
    "type_line",
    "cmc",
    "oracle_text",
    "keywords",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column '{0}' not found in CSV")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// One card row with its derived effect-category flags.
///
/// The identifying fields come straight from the CSV; the three booleans are
/// filled in later by the tagger and start out false.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub name: String,
    pub set_name: String,
    pub mana_value: f64,
    pub type_line: String,
    pub oracle_text: String,
    pub keywords: String,
    pub color_identity: String,
    pub evasion: bool,
    pub removal: bool,
    pub combat_trick: bool,
}

impl CardRecord {
    pub fn is_creature(&self) -> bool {
        self.type_line.contains("Creature")
    }
}

/// Handles CSV file loading with Polars for high performance.
pub struct CardLoader {
    df: Option<DataFrame>,
}

impl Default for CardLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CardLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars and validate the required columns.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        for required in REQUIRED_COLUMNS {
            if !df.get_column_names().iter().any(|c| c.as_str() == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Extract typed card records from the loaded DataFrame.
    ///
    /// Missing text cells coerce to an empty string so they cannot match any
    /// pattern downstream. Rows without a numeric mana value are skipped with
    /// a warning since they cannot join any curve bucket.
    pub fn extract_cards(&self) -> Result<Vec<CardRecord>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;

        let name = df.column("name").ok();
        let set_name = df.column("set_name")?;
        let color_identity = df.column("color_identity")?;
        let type_line = df.column("type_line")?;
        let oracle_text = df.column("oracle_text")?;
        let keywords = df.column("keywords")?;
        let mana_col = df.column("cmc")?.cast(&DataType::Float64)?;
        let mana_ca = mana_col.f64()?;

        let mut cards = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let mana_value = match mana_ca.get(i) {
                Some(v) if !v.is_nan() => v,
                _ => {
                    log::warn!("Row {}: missing mana value, skipping", i);
                    continue;
                }
            };

            cards.push(CardRecord {
                name: name.map(|col| cell_to_string(col, i)).unwrap_or_default(),
                set_name: cell_to_string(set_name, i),
                mana_value,
                type_line: cell_to_string(type_line, i),
                oracle_text: cell_to_string(oracle_text, i),
                keywords: cell_to_string(keywords, i),
                color_identity: cell_to_string(color_identity, i),
                evasion: false,
                removal: false,
                combat_trick: false,
            });
        }

        Ok(cards)
    }
}

/// Render one cell as a plain string; nulls become empty.
fn cell_to_string(col: &Column, i: usize) -> String {
    match col.get(i) {
        Ok(v) if !v.is_null() => v.to_string().trim_matches('"').to_string(),
        _ => String::new(),
    }
}

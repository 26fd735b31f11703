//! Loads exported assessment history for the stats summarizer.

mod parser;

pub use parser::RowError;

use crate::scoring::AssessmentRecord;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    /// Array of records with RFC 3339 timestamps.
    Json,
    /// `timestamp,strength,cardio,power,muscle,ffmi` with blank cells for missing values.
    Csv,
}

impl HistoryFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl FromStr for HistoryFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported history format '{other}' (expected json or csv)")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryImportError {
    #[error("failed to read assessment history: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid assessment history JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid assessment history CSV: {0}")]
    Csv(#[from] RowError),
}

pub struct AssessmentHistoryImporter;

impl AssessmentHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        format: Option<HistoryFormat>,
    ) -> Result<Vec<AssessmentRecord>, HistoryImportError> {
        let path = path.as_ref();
        let format = format.unwrap_or_else(|| HistoryFormat::from_path(path));
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: HistoryFormat,
    ) -> Result<Vec<AssessmentRecord>, HistoryImportError> {
        let records = match format {
            HistoryFormat::Json => serde_json::from_reader(reader)?,
            HistoryFormat::Csv => parser::parse_csv(reader)?,
        };
        tracing::debug!(count = records.len(), ?format, "imported assessment history");
        Ok(records)
    }
}

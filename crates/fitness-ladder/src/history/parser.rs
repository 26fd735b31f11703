use crate::scoring::stats::parse_timestamp;
use crate::scoring::AssessmentRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: cannot parse timestamp '{value}'")]
    Timestamp { row: usize, value: String },
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<AssessmentRecord>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<HistoryRow>().enumerate() {
        let row = row?;
        // Header is line 1.
        let line = index + 2;
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| RowError::Timestamp {
            row: line,
            value: row.timestamp.clone(),
        })?;

        records.push(AssessmentRecord {
            timestamp,
            strength: row.strength,
            cardio: row.cardio,
            power: row.power,
            muscle: row.muscle,
            ffmi: row.ffmi,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    timestamp: String,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    strength: Option<f64>,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    cardio: Option<f64>,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    power: Option<f64>,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    muscle: Option<f64>,
    #[serde(default, deserialize_with = "empty_cell_as_none")]
    ffmi: Option<f64>,
}

fn empty_cell_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

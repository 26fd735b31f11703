use super::domain::Category;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Recency filter applied to history before aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl TimeWindow {
    /// Exact, case-sensitive match; anything else is [`TimeWindow::All`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::All,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    pub const fn max_age_days(self) -> Option<f64> {
        match self {
            Self::Week => Some(7.0),
            Self::Month => Some(30.0),
            Self::Year => Some(365.0),
            Self::All => None,
        }
    }

    pub fn contains(self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.max_age_days() {
            Some(limit) => {
                let age_days = (now - timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY;
                age_days <= limit
            }
            None => true,
        }
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(TimeWindow::parse).unwrap_or_default())
    }
}

/// One past assessment, as persisted by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    #[serde(deserialize_with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmi: Option<f64>,
}

impl AssessmentRecord {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            strength: None,
            cardio: None,
            power: None,
            muscle: None,
            ffmi: None,
        }
    }

    pub fn value(&self, category: Category) -> Option<f64> {
        match category {
            Category::Strength => self.strength,
            Category::Cardio => self.cardio,
            Category::Power => self.power,
            Category::Muscle => self.muscle,
            Category::Ffmi => self.ffmi,
        }
    }

    pub fn with(mut self, category: Category, value: f64) -> Self {
        let slot = match category {
            Category::Strength => &mut self.strength,
            Category::Cardio => &mut self.cardio,
            Category::Power => &mut self.power,
            Category::Muscle => &mut self.muscle,
            Category::Ffmi => &mut self.ffmi,
        };
        *slot = Some(value);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

/// Epoch milliseconds, RFC 3339, or a bare `YYYY-MM-DD` date.
fn flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(millis) => DateTime::from_timestamp_millis(millis),
        RawTimestamp::FractionalMillis(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        RawTimestamp::FractionalMillis(_) => None,
        RawTimestamp::Text(text) => parse_timestamp(&text),
    };
    parsed.ok_or_else(|| serde::de::Error::custom("timestamp out of range or unparseable"))
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: usize,
    pub average: BTreeMap<Category, f64>,
}

impl StatsSummary {
    /// "No data" summary.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Payload of a stats request: history plus the window to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    #[serde(default)]
    pub assessments: Vec<AssessmentRecord>,
    #[serde(default)]
    pub time_range: TimeWindow,
}

impl StatsRequest {
    pub fn summarize_at(&self, now: DateTime<Utc>) -> StatsSummary {
        summarize_at(&self.assessments, self.time_range, now)
    }
}

pub fn summarize(records: &[AssessmentRecord], window: TimeWindow) -> StatsSummary {
    summarize_at(records, window, Utc::now())
}

pub fn summarize_at(
    records: &[AssessmentRecord],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> StatsSummary {
    let filtered: Vec<&AssessmentRecord> = records
        .iter()
        .filter(|record| window.contains(record.timestamp, now))
        .collect();

    let mut average = BTreeMap::new();
    for category in Category::ordered() {
        let (sum, count) = filtered
            .iter()
            .filter_map(|record| record.value(category))
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

        if count > 0 {
            average.insert(category, sum / count as f64);
        }
    }

    tracing::debug!(
        window = window.as_str(),
        input = records.len(),
        kept = filtered.len(),
        "summarized assessment history"
    );

    StatsSummary {
        total: filtered.len(),
        average,
    }
}

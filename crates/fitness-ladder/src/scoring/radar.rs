use serde::{Deserialize, Serialize};

/// Axes of the radar chart, in plotting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RadarAxis {
    Strength,
    Cardio,
    Power,
    Muscle,
    BodyFatPercentage,
}

impl RadarAxis {
    pub const COUNT: usize = 5;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Strength,
            Self::Cardio,
            Self::Power,
            Self::Muscle,
            Self::BodyFatPercentage,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Cardio => "Cardio",
            Self::Power => "Power",
            Self::Muscle => "Muscle Mass",
            Self::BodyFatPercentage => "Body Fat %",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub value: f64,
    pub label: RadarAxis,
}

impl RadarPoint {
    /// Zero-valued chart shown when projection is unavailable.
    pub fn neutral_chart() -> Vec<RadarPoint> {
        RadarAxis::ordered()
            .into_iter()
            .map(|label| RadarPoint { value: 0.0, label })
            .collect()
    }
}

/// Score and maximum sequences, aligned by axis position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarRequest {
    pub scores: Vec<f64>,
    pub max_scores: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RadarError {
    #[error("scores has {scores} entries but maxScores has {max_scores}")]
    LengthMismatch { scores: usize, max_scores: usize },
    #[error("radar charts need exactly {expected} axes, got {actual}")]
    AxisCount { expected: usize, actual: usize },
}

/// Projects each score onto a percentage of its maximum.
///
/// A zero or non-finite maximum projects to `0.0`.
pub fn compute_radar_data(
    scores: &[f64],
    max_scores: &[f64],
) -> Result<Vec<RadarPoint>, RadarError> {
    if scores.len() != max_scores.len() {
        return Err(RadarError::LengthMismatch {
            scores: scores.len(),
            max_scores: max_scores.len(),
        });
    }
    if scores.len() != RadarAxis::COUNT {
        return Err(RadarError::AxisCount {
            expected: RadarAxis::COUNT,
            actual: scores.len(),
        });
    }

    let points = RadarAxis::ordered()
        .into_iter()
        .zip(scores.iter().zip(max_scores))
        .map(|(label, (&score, &max))| RadarPoint {
            value: percent_of(score, max),
            label,
        })
        .collect();

    Ok(points)
}

impl RadarRequest {
    pub fn project(&self) -> Result<Vec<RadarPoint>, RadarError> {
        compute_radar_data(&self.scores, &self.max_scores)
    }
}

fn percent_of(score: f64, max: f64) -> f64 {
    if max == 0.0 || !max.is_finite() {
        return 0.0;
    }
    score / max * 100.0
}

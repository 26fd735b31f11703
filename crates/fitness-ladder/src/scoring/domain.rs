use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Scored assessment categories, in the order they are weighted and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Strength,
    Cardio,
    Power,
    Muscle,
    Ffmi,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Strength,
            Self::Cardio,
            Self::Power,
            Self::Muscle,
            Self::Ffmi,
        ]
    }

    /// Contribution of the category to the ladder score. Weights sum to 1.0.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Strength => 0.25,
            Self::Cardio => 0.25,
            Self::Power => 0.20,
            Self::Muscle => 0.20,
            Self::Ffmi => 0.10,
        }
    }

    /// Wire name, matching the serialized form.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Power => "power",
            Self::Muscle => "muscle",
            Self::Ffmi => "ffmi",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Cardio => "Cardio",
            Self::Power => "Power",
            Self::Muscle => "Muscle",
            Self::Ffmi => "FFMI",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalized sub-scores for one ladder computation.
///
/// Category values are unit scale (0.0 to 1.0). Use
/// [`AssessmentInput::from_percentages`] when holding product-level 0 to 100
/// scores. Missing or `null` fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInput {
    #[serde(deserialize_with = "null_as_zero")]
    pub strength: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub cardio: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub power: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub muscle: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub ffmi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl AssessmentInput {
    /// Builds an input from 0 to 100 category scores.
    pub fn from_percentages(
        strength: f64,
        cardio: f64,
        power: f64,
        muscle: f64,
        ffmi: f64,
        age: Option<u32>,
    ) -> Self {
        Self {
            strength: strength / 100.0,
            cardio: cardio / 100.0,
            power: power / 100.0,
            muscle: muscle / 100.0,
            ffmi: ffmi / 100.0,
            age,
        }
    }

    pub fn value(&self, category: Category) -> f64 {
        match category {
            Category::Strength => self.strength,
            Category::Cardio => self.cardio,
            Category::Power => self.power,
            Category::Muscle => self.muscle,
            Category::Ffmi => self.ffmi,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

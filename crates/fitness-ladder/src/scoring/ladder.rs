use super::domain::{AssessmentInput, Category};
use serde::{Deserialize, Serialize};
use std::fmt;

const NEUTRAL_AGE: f64 = 20.0;
const AGE_DECAY_PER_YEAR: f64 = 0.01;
const AGE_FACTOR_FLOOR: f64 = 0.8;
const LIMIT_BREAK_CAP: f64 = 100.0;

/// Rounded composite used for ladder ranking.
///
/// Signed so that out-of-range inputs surface as-is instead of being clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LadderScore(pub i64);

impl LadderScore {
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LadderScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Σ value × weight over the five categories.
pub fn weighted_sum(input: &AssessmentInput) -> f64 {
    Category::ordered()
        .into_iter()
        .map(|category| input.value(category) * category.weight())
        .sum()
}

/// Age multiplier in `[0.8, 1.0]`; neutral at 20 and below or when age is unknown.
pub fn age_factor(age: Option<u32>) -> f64 {
    match age {
        Some(age) if age > 0 => {
            let factor = 1.0 - (f64::from(age) - NEUTRAL_AGE) * AGE_DECAY_PER_YEAR;
            factor.clamp(AGE_FACTOR_FLOOR, 1.0)
        }
        _ => 1.0,
    }
}

/// Unrounded ladder score on the 0 to 100 scale.
pub fn raw_ladder_score(input: &AssessmentInput) -> f64 {
    weighted_sum(input) * age_factor(input.age) * 100.0
}

pub fn compute_ladder_score(input: &AssessmentInput) -> LadderScore {
    let raw = raw_ladder_score(input);
    tracing::debug!(raw, age = ?input.age, "computed ladder score");
    LadderScore(raw.round() as i64)
}

/// Caps unverified scores at 100; verified athletes may exceed it.
pub fn apply_limit_break(score: f64, verified: bool) -> f64 {
    if !verified && score > LIMIT_BREAK_CAP {
        LIMIT_BREAK_CAP
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(value: f64) -> AssessmentInput {
        AssessmentInput {
            strength: value,
            cardio: value,
            power: value,
            muscle: value,
            ffmi: value,
            age: None,
        }
    }

    #[test]
    fn perfect_scores_at_neutral_age_reach_one_hundred() {
        assert_eq!(compute_ladder_score(&all(1.0).with_age(20)), LadderScore(100));
        assert_eq!(compute_ladder_score(&all(1.0)), LadderScore(100));
    }

    #[test]
    fn age_factor_floors_at_eighty_percent() {
        assert_eq!(compute_ladder_score(&all(1.0).with_age(100)), LadderScore(80));
        assert!((age_factor(Some(40)) - AGE_FACTOR_FLOOR).abs() < 1e-12);
        assert_eq!(age_factor(Some(65)), AGE_FACTOR_FLOOR);
        assert!((age_factor(Some(30)) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn age_never_boosts_the_score() {
        assert_eq!(age_factor(Some(12)), 1.0);
        assert_eq!(age_factor(Some(0)), 1.0);
        assert_eq!(compute_ladder_score(&all(0.5).with_age(15)), LadderScore(50));
    }

    #[test]
    fn weights_are_applied_per_category() {
        let input = AssessmentInput {
            strength: 1.0,
            ..AssessmentInput::default()
        };
        assert_eq!(compute_ladder_score(&input), LadderScore(25));

        let input = AssessmentInput {
            ffmi: 1.0,
            ..AssessmentInput::default()
        };
        assert_eq!(compute_ladder_score(&input), LadderScore(10));
    }

    #[test]
    fn score_is_monotonic_in_each_category() {
        let base = all(0.4);
        for category in Category::ordered() {
            let mut previous = compute_ladder_score(&base);
            for step in 1..=10 {
                let mut input = base;
                let bumped = 0.4 + f64::from(step) * 0.06;
                match category {
                    Category::Strength => input.strength = bumped,
                    Category::Cardio => input.cardio = bumped,
                    Category::Power => input.power = bumped,
                    Category::Muscle => input.muscle = bumped,
                    Category::Ffmi => input.ffmi = bumped,
                }
                let current = compute_ladder_score(&input);
                assert!(current >= previous, "{category} decreased the score");
                previous = current;
            }
        }
    }

    #[test]
    fn negative_inputs_propagate() {
        assert_eq!(compute_ladder_score(&all(-1.0)), LadderScore(-100));
    }

    #[test]
    fn limit_break_caps_unverified_scores() {
        assert_eq!(apply_limit_break(112.5, false), 100.0);
        assert_eq!(apply_limit_break(112.5, true), 112.5);
        assert_eq!(apply_limit_break(87.0, false), 87.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let input = AssessmentInput::from_percentages(72.0, 65.0, 58.0, 81.0, 44.0, Some(34));
        assert_eq!(compute_ladder_score(&input), compute_ladder_score(&input));
    }
}

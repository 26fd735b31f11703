use super::aggregates::{ExerciseScores, LiftAggregates};
use super::domain::AssessmentInput;
use super::filters::{AthleteProfile, FilterTags};
use super::ladder::{apply_limit_break, raw_ladder_score, LadderScore};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the ladder needs to rank one athlete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LadderSubmission {
    pub scores: AssessmentInput,
    pub verified: bool,
    pub exercises: ExerciseScores,
    pub profile: AthleteProfile,
}

/// Pre-calculated leaderboard row for a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderEntry {
    pub raw_score: f64,
    pub ladder_score: LadderScore,
    pub verified: bool,
    pub lifts: LiftAggregates,
    pub filters: FilterTags,
}

impl LadderSubmission {
    pub fn evaluate(&self, today: NaiveDate) -> LadderEntry {
        let raw_score = raw_ladder_score(&self.scores);
        let capped = apply_limit_break(raw_score, self.verified);

        LadderEntry {
            raw_score,
            ladder_score: LadderScore(capped.round() as i64),
            verified: self.verified,
            lifts: LiftAggregates::from_exercises(&self.exercises),
            filters: FilterTags::from_profile(&self.profile, today),
        }
    }
}

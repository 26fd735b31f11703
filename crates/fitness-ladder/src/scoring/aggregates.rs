use serde::{Deserialize, Serialize};

/// Squat + bench + deadlift threshold for the 1000 lb club, in kilograms.
const THOUSAND_POUND_CLUB_KG: f64 = 453.6;

/// Best results per exercise, as entered on the assessment pages.
///
/// Lifts are kilograms; sprint is a score and the jumps are centimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExerciseScores {
    pub bench_press: f64,
    pub squat: f64,
    pub deadlift: f64,
    pub pull_up: f64,
    pub overhead_press: f64,
    pub sprint: f64,
    pub vertical_jump: f64,
    pub broad_jump: f64,
}

/// Leaderboard totals derived from the raw exercise results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftAggregates {
    pub sbd_total: f64,
    pub big_five_total: f64,
    pub explosive_avg: f64,
    #[serde(rename = "is1000lbClub")]
    pub is_1000lb_club: bool,
}

impl LiftAggregates {
    pub fn from_exercises(scores: &ExerciseScores) -> Self {
        let sbd_total = finite_or_zero(scores.bench_press)
            + finite_or_zero(scores.squat)
            + finite_or_zero(scores.deadlift);
        let big_five_total = sbd_total
            + finite_or_zero(scores.pull_up)
            + finite_or_zero(scores.overhead_press);

        // Zero marks an unattempted jump.
        let explosive: Vec<f64> = [scores.sprint, scores.vertical_jump, scores.broad_jump]
            .into_iter()
            .map(finite_or_zero)
            .filter(|value| *value > 0.0)
            .collect();
        let explosive_avg = if explosive.is_empty() {
            0.0
        } else {
            explosive.iter().sum::<f64>() / explosive.len() as f64
        };

        Self {
            sbd_total: round_cents(sbd_total),
            big_five_total: round_cents(big_five_total),
            explosive_avg: round_cents(explosive_avg),
            is_1000lb_club: sbd_total >= THOUSAND_POUND_CLUB_KG,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

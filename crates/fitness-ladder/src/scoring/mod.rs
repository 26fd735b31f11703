//! Pure scoring computations: ladder score, radar projection, and windowed stats.

pub mod aggregates;
pub mod domain;
pub mod filters;
pub mod ladder;
pub mod radar;
pub mod stats;
pub mod submission;

pub use aggregates::{ExerciseScores, LiftAggregates};
pub use domain::{AssessmentInput, Category};
pub use filters::{AthleteProfile, FilterTags};
pub use ladder::{apply_limit_break, compute_ladder_score, LadderScore};
pub use radar::{compute_radar_data, RadarAxis, RadarError, RadarPoint, RadarRequest};
pub use stats::{summarize, summarize_at, AssessmentRecord, StatsRequest, StatsSummary, TimeWindow};
pub use submission::{LadderEntry, LadderSubmission};

//! Scoring and aggregation engine behind the fitness ladder.
//!
//! The [`scoring`] module holds the pure computations (ladder score, radar
//! projection, windowed statistics). [`worker`] moves those computations onto a
//! background task behind a correlation-id envelope, and [`history`] turns
//! exported assessment history into records the summarizer understands.

pub mod config;
pub mod error;
pub mod history;
pub mod scoring;
pub mod telemetry;
pub mod worker;

//! Request/response transport for running scoring tasks off the caller's task.
//!
//! Requests travel as `{ id, type, data }` envelopes and every response echoes
//! the request id. Dispatch is a closed [`Task`] enum.

pub mod dispatch;
mod envelope;
mod handle;

pub use envelope::{
    RequestEnvelope, Task, TaskError, TaskOutput, WorkerRequest, WorkerResponse,
    LADDER_SCORE_TAG, RADAR_DATA_TAG, USER_STATS_TAG,
};
pub use handle::{CalculationWorker, WorkerError, WorkerHandle};

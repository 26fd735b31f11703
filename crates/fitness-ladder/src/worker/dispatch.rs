use super::envelope::{RequestEnvelope, Task, TaskError, TaskOutput, WorkerRequest, WorkerResponse};
use crate::scoring::compute_ladder_score;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Runs a single task. `now` anchors time-windowed statistics.
pub fn execute(task: &Task, now: DateTime<Utc>) -> Result<TaskOutput, TaskError> {
    match task {
        Task::CalculateLadderScore(input) => Ok(TaskOutput::LadderScore(compute_ladder_score(input))),
        Task::CalculateRadarData(request) => Ok(TaskOutput::RadarData(request.project()?)),
        Task::ProcessUserStats(request) => Ok(TaskOutput::UserStats(request.summarize_at(now))),
    }
}

pub fn respond(request: &WorkerRequest, now: DateTime<Utc>) -> WorkerResponse {
    let outcome = execute(&request.task, now);
    debug!(
        id = request.id,
        operation = request.task.tag(),
        success = outcome.is_ok(),
        "processed worker request"
    );
    WorkerResponse {
        id: request.id,
        outcome,
    }
}

/// Handles a raw envelope end to end, answering decode failures under the caller's id.
pub fn handle_envelope(envelope: RequestEnvelope, now: DateTime<Utc>) -> WorkerResponse {
    let id = envelope.id;
    match envelope.into_request() {
        Ok(request) => respond(&request, now),
        Err(error) => {
            debug!(id, %error, "rejected worker request");
            WorkerResponse::failed(id, error)
        }
    }
}

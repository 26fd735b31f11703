use super::dispatch;
use super::envelope::{RequestEnvelope, Task, TaskError, TaskOutput, WorkerRequest, WorkerResponse};
use crate::config::WorkerConfig;
use crate::scoring::{AssessmentInput, LadderScore, RadarPoint, RadarRequest, StatsRequest, StatsSummary};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

struct Job {
    request: WorkerRequest,
    reply: oneshot::Sender<WorkerResponse>,
}

/// Transport failures between a caller and the calculation worker.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkerError {
    #[error("calculation worker is not running")]
    Unavailable,
    #[error("calculation worker stopped before answering request {id}")]
    TornDown { id: u64 },
    #[error("response {actual} does not match request {expected}")]
    Correlation { expected: u64, actual: u64 },
    #[error("worker answered {operation} with an unexpected result")]
    UnexpectedOutput { operation: &'static str },
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Background task that executes scoring requests in arrival order.
pub struct CalculationWorker;

impl CalculationWorker {
    /// Spawns the worker on the current tokio runtime.
    pub fn spawn(config: &WorkerConfig) -> WorkerHandle {
        let (sender, receiver) = mpsc::channel(config.queue_depth.max(1));
        let task = tokio::spawn(run(receiver));
        debug!(queue_depth = config.queue_depth, "calculation worker started");

        WorkerHandle {
            sender,
            sequence: Arc::new(AtomicU64::new(1)),
            task: Arc::new(task),
        }
    }
}

async fn run(mut receiver: mpsc::Receiver<Job>) {
    while let Some(job) = receiver.recv().await {
        let response = dispatch::respond(&job.request, Utc::now());
        if job.reply.send(response).is_err() {
            debug!(id = job.request.id, "caller dropped before the response was ready");
        }
    }
    debug!("calculation worker stopped");
}

/// Cloneable client for a [`CalculationWorker`].
#[derive(Clone)]
pub struct WorkerHandle {
    sender: mpsc::Sender<Job>,
    sequence: Arc<AtomicU64>,
    task: Arc<JoinHandle<()>>,
}

impl WorkerHandle {
    fn next_id(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// Sends a task and waits for the response carrying the same id.
    pub async fn submit(&self, task: Task) -> Result<TaskOutput, WorkerError> {
        let id = self.next_id();
        let (reply, response) = oneshot::channel();

        self.sender
            .send(Job {
                request: WorkerRequest { id, task },
                reply,
            })
            .await
            .map_err(|_| WorkerError::Unavailable)?;

        let response = response.await.map_err(|_| WorkerError::TornDown { id })?;
        if response.id != id {
            return Err(WorkerError::Correlation {
                expected: id,
                actual: response.id,
            });
        }

        Ok(response.outcome?)
    }

    /// Runs a wire envelope through the worker and answers under the caller's id.
    pub async fn relay(&self, envelope: RequestEnvelope) -> Result<WorkerResponse, WorkerError> {
        let caller_id = envelope.id;
        let task = match envelope.into_task() {
            Ok(task) => task,
            Err(error) => return Ok(WorkerResponse::failed(caller_id, error)),
        };

        match self.submit(task).await {
            Ok(output) => Ok(WorkerResponse::completed(caller_id, output)),
            Err(WorkerError::Task(error)) => Ok(WorkerResponse::failed(caller_id, error)),
            Err(other) => Err(other),
        }
    }

    pub async fn ladder_score(&self, input: AssessmentInput) -> Result<LadderScore, WorkerError> {
        let task = Task::CalculateLadderScore(input);
        let operation = task.tag();
        match self.submit(task).await? {
            TaskOutput::LadderScore(score) => Ok(score),
            _ => Err(WorkerError::UnexpectedOutput { operation }),
        }
    }

    pub async fn radar_data(&self, request: RadarRequest) -> Result<Vec<RadarPoint>, WorkerError> {
        let task = Task::CalculateRadarData(request);
        let operation = task.tag();
        match self.submit(task).await? {
            TaskOutput::RadarData(points) => Ok(points),
            _ => Err(WorkerError::UnexpectedOutput { operation }),
        }
    }

    pub async fn user_stats(&self, request: StatsRequest) -> Result<StatsSummary, WorkerError> {
        let task = Task::ProcessUserStats(request);
        let operation = task.tag();
        match self.submit(task).await? {
            TaskOutput::UserStats(summary) => Ok(summary),
            _ => Err(WorkerError::UnexpectedOutput { operation }),
        }
    }

    /// Radar data, or the all-zero chart when the computation fails.
    pub async fn radar_data_or_neutral(&self, request: RadarRequest) -> Vec<RadarPoint> {
        self.radar_data(request).await.unwrap_or_else(|error| {
            warn!(%error, "radar projection failed; showing neutral chart");
            RadarPoint::neutral_chart()
        })
    }

    /// Stats summary, or "no data" when the computation fails.
    pub async fn stats_or_empty(&self, request: StatsRequest) -> StatsSummary {
        self.user_stats(request).await.unwrap_or_else(|error| {
            warn!(%error, "stats aggregation failed; showing empty summary");
            StatsSummary::empty()
        })
    }

    /// Stops the worker. Pending and later requests fail with a transport error.
    pub fn terminate(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

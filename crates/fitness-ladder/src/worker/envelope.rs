use crate::scoring::{
    AssessmentInput, LadderScore, RadarError, RadarPoint, RadarRequest, StatsRequest,
    StatsSummary,
};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

pub const LADDER_SCORE_TAG: &str = "CALCULATE_LADDER_SCORE";
pub const RADAR_DATA_TAG: &str = "CALCULATE_RADAR_DATA";
pub const USER_STATS_TAG: &str = "PROCESS_USER_STATS";

/// Operations the calculation worker understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    CalculateLadderScore(AssessmentInput),
    CalculateRadarData(RadarRequest),
    ProcessUserStats(StatsRequest),
}

impl Task {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::CalculateLadderScore(_) => LADDER_SCORE_TAG,
            Self::CalculateRadarData(_) => RADAR_DATA_TAG,
            Self::ProcessUserStats(_) => USER_STATS_TAG,
        }
    }

    /// Decodes a tagged payload; unknown tags and malformed payloads are errors.
    pub fn from_parts(tag: &str, data: Value) -> Result<Self, TaskError> {
        match tag {
            LADDER_SCORE_TAG => decode(LADDER_SCORE_TAG, data).map(Self::CalculateLadderScore),
            RADAR_DATA_TAG => decode(RADAR_DATA_TAG, data).map(Self::CalculateRadarData),
            USER_STATS_TAG => decode(USER_STATS_TAG, data).map(Self::ProcessUserStats),
            other => Err(TaskError::UnknownOperation(other.to_string())),
        }
    }
}

fn decode<T>(operation: &'static str, data: Value) -> Result<T, TaskError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(data).map_err(|err| TaskError::MalformedPayload {
        operation,
        reason: err.to_string(),
    })
}

/// Raw `{ id, type, data }` message as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl RequestEnvelope {
    pub fn into_task(self) -> Result<Task, TaskError> {
        Task::from_parts(&self.kind, self.data)
    }

    pub fn into_request(self) -> Result<WorkerRequest, TaskError> {
        let id = self.id;
        self.into_task().map(|task| WorkerRequest { id, task })
    }
}

/// A decoded request paired with its correlation id.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerRequest {
    pub id: u64,
    pub task: Task,
}

impl Serialize for WorkerRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WorkerRequest", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.task.tag())?;
        match &self.task {
            Task::CalculateLadderScore(input) => state.serialize_field("data", input)?,
            Task::CalculateRadarData(request) => state.serialize_field("data", request)?,
            Task::ProcessUserStats(request) => state.serialize_field("data", request)?,
        }
        state.end()
    }
}

/// Successful result of a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskOutput {
    LadderScore(LadderScore),
    RadarData(Vec<RadarPoint>),
    UserStats(StatsSummary),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    #[error("Unknown task type: {0}")]
    UnknownOperation(String),
    #[error("invalid {operation} payload: {reason}")]
    MalformedPayload {
        operation: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Radar(#[from] RadarError),
}

/// Reply matched to a request by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerResponse {
    pub id: u64,
    pub outcome: Result<TaskOutput, TaskError>,
}

impl WorkerResponse {
    pub fn completed(id: u64, output: TaskOutput) -> Self {
        Self {
            id,
            outcome: Ok(output),
        }
    }

    pub fn failed(id: u64, error: TaskError) -> Self {
        Self {
            id,
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl Serialize for WorkerResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WorkerResponse", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("success", &self.is_success())?;
        match &self.outcome {
            Ok(output) => state.serialize_field("result", output)?,
            Err(error) => state.serialize_field("error", &error.to_string())?,
        }
        state.end()
    }
}

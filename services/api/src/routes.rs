use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use fitness_ladder::error::AppError;
use fitness_ladder::scoring::{
    AssessmentInput, AssessmentRecord, LadderEntry, LadderScore, LadderSubmission, RadarPoint,
    RadarRequest, StatsRequest, StatsSummary, TimeWindow,
};
use fitness_ladder::worker::{RequestEnvelope, WorkerResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Scale of the category values in a ladder score request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScoreScale {
    #[default]
    Unit,
    Percent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LadderScoreRequest {
    pub(crate) input: AssessmentInput,
    #[serde(default)]
    pub(crate) scale: ScoreScale,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LadderScoreResponse {
    pub(crate) ladder_score: LadderScore,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LadderSubmissionRequest {
    #[serde(flatten)]
    pub(crate) submission: LadderSubmission,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatsResponse {
    pub(crate) window: TimeWindow,
    #[serde(flatten)]
    pub(crate) summary: StatsSummary,
}

/// Everything the profile dashboard renders in one call.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct DashboardRequest {
    pub(crate) scores: Vec<f64>,
    pub(crate) max_scores: Vec<f64>,
    pub(crate) assessments: Vec<AssessmentRecord>,
    pub(crate) time_range: TimeWindow,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) radar: Vec<RadarPoint>,
    pub(crate) stats: StatsResponse,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/ladder/score", post(ladder_score_endpoint))
        .route("/api/v1/ladder/submission", post(ladder_submission_endpoint))
        .route("/api/v1/radar", post(radar_endpoint))
        .route("/api/v1/stats/summary", post(stats_endpoint))
        .route("/api/v1/dashboard", post(dashboard_endpoint))
        .route("/api/v1/worker/dispatch", post(dispatch_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.is_ready();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn ladder_score_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<LadderScoreRequest>,
) -> Result<Json<LadderScoreResponse>, AppError> {
    let LadderScoreRequest { input, scale } = payload;
    let input = match scale {
        ScoreScale::Unit => input,
        ScoreScale::Percent => AssessmentInput::from_percentages(
            input.strength,
            input.cardio,
            input.power,
            input.muscle,
            input.ffmi,
            input.age,
        ),
    };

    let ladder_score = state.worker.ladder_score(input).await?;
    Ok(Json(LadderScoreResponse { ladder_score }))
}

pub(crate) async fn ladder_submission_endpoint(
    Json(payload): Json<LadderSubmissionRequest>,
) -> Json<LadderEntry> {
    let today = payload
        .today
        .unwrap_or_else(|| Local::now().date_naive());
    Json(payload.submission.evaluate(today))
}

pub(crate) async fn radar_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RadarRequest>,
) -> Result<Json<Vec<RadarPoint>>, AppError> {
    let points = state.worker.radar_data(payload).await?;
    Ok(Json(points))
}

pub(crate) async fn stats_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<StatsRequest>,
) -> Result<Json<StatsResponse>, AppError> {
    let window = payload.time_range;
    let summary = state.worker.user_stats(payload).await?;
    Ok(Json(StatsResponse { window, summary }))
}

/// Never fails on bad figures: the chart degrades to neutral and stats to "no data".
pub(crate) async fn dashboard_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<DashboardRequest>,
) -> Json<DashboardResponse> {
    let DashboardRequest {
        scores,
        max_scores,
        assessments,
        time_range,
    } = payload;

    let radar = state
        .worker
        .radar_data_or_neutral(RadarRequest { scores, max_scores })
        .await;
    let summary = state
        .worker
        .stats_or_empty(StatsRequest {
            assessments,
            time_range,
        })
        .await;

    Json(DashboardResponse {
        radar,
        stats: StatsResponse {
            window: time_range,
            summary,
        },
    })
}

pub(crate) async fn dispatch_endpoint(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<WorkerResponse>, AppError> {
    let response = state.worker.relay(envelope).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submission_endpoint_applies_limit_break() {
        let payload: LadderSubmissionRequest = serde_json::from_value(json!({
            "scores": { "strength": 1.4, "cardio": 1.2, "power": 1.1, "muscle": 1.0, "ffmi": 1.0 },
            "verified": false,
            "exercises": { "benchPress": 100, "squat": 140, "deadlift": 180 },
            "profile": { "birthDate": "1990-01-15", "height": 176 },
            "today": "2025-10-01"
        }))
        .expect("request parses");

        let Json(entry) = ladder_submission_endpoint(Json(payload)).await;

        assert!(entry.raw_score > 100.0);
        assert_eq!(entry.ladder_score, LadderScore(100));
        assert_eq!(entry.lifts.sbd_total, 420.0);
        assert_eq!(entry.filters.age_group, "30-39");
        assert_eq!(entry.filters.height_class, "170-179cm");
    }

    #[test]
    fn score_scale_defaults_to_unit() {
        let request: LadderScoreRequest =
            serde_json::from_value(json!({ "input": { "strength": 0.5 } })).expect("parses");
        assert_eq!(request.scale, ScoreScale::Unit);

        let request: LadderScoreRequest =
            serde_json::from_value(json!({ "input": {}, "scale": "percent" })).expect("parses");
        assert_eq!(request.scale, ScoreScale::Percent);
    }
}

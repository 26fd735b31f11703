use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use fitness_ladder::config::WorkerConfig;
use fitness_ladder::worker::CalculationWorker;
use fitness_ladder_api::{router, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_state() -> AppState {
    let worker = CalculationWorker::spawn(&WorkerConfig::default());
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    AppState::new(worker, metrics)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, payload)
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(router(test_state()), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn readiness_waits_for_startup() {
    let state = test_state();

    let (status, body) = send(router(state.clone()), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "initializing");

    state.mark_ready();
    let (status, body) = send(router(state), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn ladder_score_accepts_both_scales() {
    let app = router(test_state());

    let (status, body) = send(
        app.clone(),
        "POST",
        "/api/v1/ladder/score",
        Some(json!({
            "input": { "strength": 1.0, "cardio": 1.0, "power": 1.0, "muscle": 1.0, "ffmi": 1.0, "age": 20 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ladderScore"], 100);

    let (status, body) = send(
        app,
        "POST",
        "/api/v1/ladder/score",
        Some(json!({
            "input": { "strength": 100, "cardio": 100, "power": 100, "muscle": 100, "ffmi": 100, "age": 100 },
            "scale": "percent"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ladderScore"], 80);
}

#[tokio::test]
async fn radar_projects_percentages() {
    let (status, body) = send(
        router(test_state()),
        "POST",
        "/api/v1/radar",
        Some(json!({
            "scores": [50, 25, 0, 100, 10],
            "maxScores": [100, 100, 100, 100, 0]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().expect("array of points");
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], json!({ "value": 50.0, "label": "strength" }));
    assert_eq!(points[4], json!({ "value": 0.0, "label": "bodyFatPercentage" }));
}

#[tokio::test]
async fn radar_rejects_mismatched_lengths() {
    let (status, body) = send(
        router(test_state()),
        "POST",
        "/api/v1/radar",
        Some(json!({ "scores": [1, 2, 3, 4, 5], "maxScores": [10, 10, 10] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test]
async fn stats_summary_averages_the_window() {
    let (status, body) = send(
        router(test_state()),
        "POST",
        "/api/v1/stats/summary",
        Some(json!({
            "assessments": [
                { "timestamp": "2025-01-10T08:00:00Z", "strength": 50.0 },
                { "timestamp": "2025-03-02T08:00:00Z", "strength": 70.0, "cardio": 40.0 }
            ],
            "timeRange": "all"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window"], "all");
    assert_eq!(body["total"], 2);
    assert_eq!(body["average"]["strength"], 60.0);
    assert_eq!(body["average"]["cardio"], 40.0);
}

#[tokio::test]
async fn dashboard_degrades_instead_of_failing() {
    let app = router(test_state());

    let (status, body) = send(
        app.clone(),
        "POST",
        "/api/v1/dashboard",
        Some(json!({
            "scores": [30, 60],
            "maxScores": [100, 100, 100],
            "assessments": [{ "timestamp": 1760000000000i64, "power": 12.0 }],
            "timeRange": "all"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let radar = body["radar"].as_array().expect("radar points");
    assert_eq!(radar.len(), 5);
    assert!(radar.iter().all(|point| point["value"] == 0.0));
    assert_eq!(body["stats"]["total"], 1);
    assert_eq!(body["stats"]["average"]["power"], 12.0);

    let (status, body) = send(
        app,
        "POST",
        "/api/v1/dashboard",
        Some(json!({
            "scores": [50, 50, 50, 50, 50],
            "maxScores": [100, 100, 100, 100, 100]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["radar"][2], json!({ "value": 50.0, "label": "power" }));
    assert_eq!(body["stats"]["total"], 0);
    assert_eq!(body["stats"]["window"], "all");
}

#[tokio::test]
async fn dispatch_accepts_null_categories() {
    let (status, body) = send(
        router(test_state()),
        "POST",
        "/api/v1/worker/dispatch",
        Some(json!({
            "id": 7,
            "type": "CALCULATE_LADDER_SCORE",
            "data": { "strength": 1, "cardio": null, "power": null, "muscle": null, "ffmi": null }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["result"], 25);
}

#[tokio::test]
async fn dispatch_echoes_ids_and_reports_unknown_operations() {
    let app = router(test_state());

    let (status, body) = send(
        app.clone(),
        "POST",
        "/api/v1/worker/dispatch",
        Some(json!({
            "id": 41,
            "type": "CALCULATE_LADDER_SCORE",
            "data": { "strength": 0.5, "cardio": 0.5, "power": 0.5, "muscle": 0.5, "ffmi": 0.5 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 41);
    assert_eq!(body["success"], true);
    assert_eq!(body["result"], 50);

    let (status, body) = send(
        app,
        "POST",
        "/api/v1/worker/dispatch",
        Some(json!({ "id": 42, "type": "OPTIMIZE_IMAGE_DATA", "data": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 42);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unknown task type: OPTIMIZE_IMAGE_DATA");
}

#[tokio::test]
async fn terminated_worker_makes_routes_unavailable() {
    let state = test_state();
    state.mark_ready();
    let app = router(state.clone());

    state.worker().terminate();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let (status, _) = send(app.clone(), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(
        app,
        "POST",
        "/api/v1/ladder/score",
        Some(json!({ "input": { "strength": 1.0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

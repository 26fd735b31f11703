use chrono::{Duration, Utc};
use fitness_ladder::config::WorkerConfig;
use fitness_ladder::scoring::{
    AssessmentInput, AssessmentRecord, Category, LadderScore, RadarPoint, RadarRequest,
    StatsRequest, StatsSummary, TimeWindow,
};
use fitness_ladder::worker::{
    CalculationWorker, RequestEnvelope, TaskError, TaskOutput, WorkerError,
};
use serde_json::json;

fn envelope(id: u64, kind: &str, data: serde_json::Value) -> RequestEnvelope {
    serde_json::from_value(json!({ "id": id, "type": kind, "data": data }))
        .expect("envelope parses")
}

#[tokio::test]
async fn worker_answers_each_operation() {
    let worker = CalculationWorker::spawn(&WorkerConfig::default());

    let score = worker
        .ladder_score(AssessmentInput {
            strength: 1.0,
            cardio: 1.0,
            power: 1.0,
            muscle: 1.0,
            ffmi: 1.0,
            age: Some(20),
        })
        .await
        .expect("ladder score computed");
    assert_eq!(score, LadderScore(100));

    let points = worker
        .radar_data(RadarRequest {
            scores: vec![25.0; 5],
            max_scores: vec![50.0; 5],
        })
        .await
        .expect("radar computed");
    assert!(points.iter().all(|point| point.value == 50.0));

    let now = Utc::now();
    let summary = worker
        .user_stats(StatsRequest {
            assessments: vec![
                AssessmentRecord::new(now - Duration::hours(1)).with(Category::Power, 30.0),
                AssessmentRecord::new(now - Duration::days(20)).with(Category::Power, 90.0),
            ],
            time_range: TimeWindow::Week,
        })
        .await
        .expect("stats computed");
    assert_eq!(summary.total, 1);
    assert_eq!(summary.average.get(&Category::Power), Some(&30.0));
}

#[tokio::test]
async fn relay_echoes_the_caller_id() {
    let worker = CalculationWorker::spawn(&WorkerConfig::default());

    let response = worker
        .relay(envelope(
            42,
            "CALCULATE_LADDER_SCORE",
            json!({ "strength": 1, "cardio": 1, "power": 1, "muscle": 1, "ffmi": 1, "age": 100 }),
        ))
        .await
        .expect("worker reachable");

    assert_eq!(response.id, 42);
    assert_eq!(response.outcome, Ok(TaskOutput::LadderScore(LadderScore(80))));
    assert_eq!(
        serde_json::to_value(&response).expect("response serializes"),
        json!({ "id": 42, "success": true, "result": 80 })
    );
}

#[tokio::test]
async fn unknown_operations_are_explicit_failures() {
    let worker = CalculationWorker::spawn(&WorkerConfig::default());

    let response = worker
        .relay(envelope(5, "OPTIMIZE_IMAGE_DATA", json!({ "quality": 0.8 })))
        .await
        .expect("worker reachable");

    assert_eq!(response.id, 5);
    assert_eq!(
        response.outcome,
        Err(TaskError::UnknownOperation("OPTIMIZE_IMAGE_DATA".to_string()))
    );
    assert!(worker.is_running());
}

#[tokio::test]
async fn concurrent_requests_receive_their_own_responses() {
    let worker = CalculationWorker::spawn(&WorkerConfig { queue_depth: 2 });

    let requests = (0..16u32).map(|step| {
        let worker = worker.clone();
        tokio::spawn(async move {
            let value = f64::from(step) / 20.0;
            let input = AssessmentInput {
                strength: value,
                cardio: value,
                power: value,
                muscle: value,
                ffmi: value,
                age: None,
            };
            let score = worker.ladder_score(input).await.expect("score computed");
            (step, score)
        })
    });

    for request in requests.collect::<Vec<_>>() {
        let (step, score) = request.await.expect("task joins");
        let expected = i64::from(step) * 5;
        assert_eq!(score, LadderScore(expected));
    }
}

#[tokio::test]
async fn terminated_worker_fails_every_request() {
    let worker = CalculationWorker::spawn(&WorkerConfig::default());
    worker.terminate();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let err = worker
        .ladder_score(AssessmentInput::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, WorkerError::Unavailable | WorkerError::TornDown { .. }),
        "unexpected error {err:?}"
    );
    assert!(!worker.is_running());
}

#[tokio::test]
async fn fallbacks_hide_failures_from_presentation() {
    let worker = CalculationWorker::spawn(&WorkerConfig::default());

    let points = worker
        .radar_data_or_neutral(RadarRequest {
            scores: vec![1.0; 3],
            max_scores: vec![1.0; 3],
        })
        .await;
    assert_eq!(points, RadarPoint::neutral_chart());

    worker.terminate();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let summary = worker
        .stats_or_empty(StatsRequest {
            assessments: Vec::new(),
            time_range: TimeWindow::All,
        })
        .await;
    assert_eq!(summary, StatsSummary::empty());
}

use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use fitness_ladder::config::AppConfig;
use fitness_ladder::error::AppError;
use fitness_ladder::telemetry;
use fitness_ladder::worker::CalculationWorker;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let worker = CalculationWorker::spawn(&config.worker);
    let state = AppState::new(worker.clone(), prometheus_handle);

    let app = router(state.clone()).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    state.mark_ready();

    info!(
        ?config.environment,
        %addr,
        queue_depth = config.worker.queue_depth,
        "fitness ladder scoring service ready"
    );

    let served = axum::serve(listener, app).await;
    worker.terminate();
    served?;
    Ok(())
}

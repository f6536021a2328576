use crate::cli::ServeArgs;
use crate::infra::{load_registry, AppState, InMemoryLeadSink};
use crate::routes::with_deposit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use deposit_ready::config::AppConfig;
use deposit_ready::error::AppError;
use deposit_ready::telemetry;
use deposit_ready::workflows::deposit::{DepositService, TracingTelemetry};
use std::sync::atomic::Ordering;
use std::sync::Arc;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = Arc::new(load_registry(&config.deposit)?);
    let states = registry.len();
    let service = Arc::new(
        DepositService::new(
            registry,
            Arc::new(TracingTelemetry),
            Arc::new(InMemoryLeadSink::default()),
        )
        .with_packet_price(config.deposit.packet_price),
    );

    let app = with_deposit_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        states,
        packet_price = config.deposit.packet_price,
        "deposit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

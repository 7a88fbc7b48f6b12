use crate::cli::ServeArgs;
use crate::infra::{
    load_aml_screen, load_scoring_policy, AppState, FieldPresenceDetector,
    FileProbeTamperingDetector, InMemoryAlertPublisher, InMemoryAuditSink,
    InMemoryIdentityRegistry,
};
use crate::routes::with_verification_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use veridoc::config::AppConfig;
use veridoc::error::AppError;
use veridoc::screening::{LexicalNameSimilarity, RiskAggregator, VerificationService};
use veridoc::telemetry;

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

    let policy = load_scoring_policy(&config.screening)?;
    let aml = load_aml_screen(&config.screening);

    let aggregator = RiskAggregator::new(
        policy,
        Arc::new(FileProbeTamperingDetector),
        Arc::new(FieldPresenceDetector),
        Arc::new(LexicalNameSimilarity),
    )?;
    let verification_service = Arc::new(VerificationService::new(
        Arc::new(InMemoryIdentityRegistry::default()),
        Arc::new(InMemoryAlertPublisher::default()),
        Arc::new(InMemoryAuditSink::default()),
        aggregator,
        aml,
    ));

    let app = with_verification_routes(verification_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "document verification service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

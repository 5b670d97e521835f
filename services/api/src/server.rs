use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_origination_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use origination_ai::config::AppConfig;
use origination_ai::error::AppError;
use origination_ai::telemetry;
use origination_ai::workflows::origination::{LoanTypeCatalog, UnderwritingConfig};
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

    let catalog = Arc::new(LoanTypeCatalog::standard());
    let underwriting = UnderwritingConfig::default();
    if let Some(seed) = config.underwriting.seed {
        info!(seed, "underwriting draws pinned to a fixed seed");
    }

    let app = with_origination_routes(catalog, underwriting, config.underwriting.seed)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "agentic origination orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

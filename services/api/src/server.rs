use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRosterRepository};
use crate::routes::with_recognition_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_score::config::{AppConfig, LlmConfig};
use talent_score::error::AppError;
use talent_score::telemetry;
use talent_score::workflows::recognition::{
    AnalysisOracle, ChatCompletionsOracle, RecognitionService, RecognitionServiceError,
    RosterImporter, UnconfiguredOracle,
};
use tracing::{info, warn};

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

    let repository = Arc::new(InMemoryRosterRepository::default());
    let oracle = select_oracle(config.llm.as_ref())?;
    let service = Arc::new(RecognitionService::new(repository, Arc::new(oracle)));

    match &config.roster.csv_path {
        Some(path) => {
            let as_of = config
                .roster
                .as_of
                .unwrap_or_else(|| Local::now().date_naive());
            let records = RosterImporter::from_path(path, as_of)?;
            let imported = service.import(records)?;
            info!(imported, path = %path.display(), %as_of, "roster seeded");
        }
        None => warn!("APP_ROSTER_CSV not set; starting with an empty roster"),
    }

    let app = with_recognition_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "talent score service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn select_oracle(llm: Option<&LlmConfig>) -> Result<Box<dyn AnalysisOracle>, AppError> {
    match llm {
        Some(settings) => {
            let oracle =
                ChatCompletionsOracle::from_config(settings).map_err(RecognitionServiceError::from)?;
            info!(
                endpoint = %settings.endpoint,
                deployment = %settings.deployment,
                "chat-completions oracle configured"
            );
            Ok(Box::new(oracle))
        }
        None => {
            warn!("APP_LLM_ENDPOINT not set; analysis and chat endpoints will answer 503");
            Ok(Box::new(UnconfiguredOracle))
        }
    }
}

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use docpilot::application::ports::ModelClient;
use docpilot::application::services::{IntakeService, JobService, OperationGateway};
use docpilot::infrastructure::cache::LocalDocumentCache;
use docpilot::infrastructure::fetch::HttpRemoteFetcher;
use docpilot::infrastructure::model::{MockModelClient, OpenAiModelClient};
use docpilot::infrastructure::observability::{TracingConfig, init_tracing};
use docpilot::infrastructure::pdf::{PdfDocumentBuilder, PdfTextExtractor, PdfiumPageRasterizer};
use docpilot::infrastructure::registry::InMemoryJobRegistry;
use docpilot::presentation::config::Settings;
use docpilot::presentation::router::create_router;
use docpilot::presentation::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(
        TracingConfig {
            level: settings.logging.level.clone(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let model: Arc<dyn ModelClient> = if settings.model.api_key.is_empty() {
        tracing::warn!("No model API key configured; using the deterministic local client");
        Arc::new(MockModelClient::new())
    } else {
        Arc::new(OpenAiModelClient::new(
            &settings.model.base_url,
            &settings.model.chat_model,
            &settings.model.speech_model,
            &settings.model.api_key,
        ))
    };

    let registry = Arc::new(InMemoryJobRegistry::new());
    let cache = Arc::new(LocalDocumentCache::new(settings.cache.dir.clone()));

    let gateway = Arc::new(OperationGateway::new(
        model,
        Arc::new(PdfTextExtractor::new()),
        Arc::new(PdfDocumentBuilder::new()),
        Arc::new(PdfiumPageRasterizer::new()),
        Arc::new(HttpRemoteFetcher::new()),
    ));

    let job_service = Arc::new(JobService::new(Arc::clone(&registry) as _, gateway));
    let intake = Arc::new(IntakeService::new(
        registry,
        Arc::clone(&cache) as _,
        settings.intake.max_file_size_mb,
    ));

    let state = AppState {
        job_service,
        intake,
        cache,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

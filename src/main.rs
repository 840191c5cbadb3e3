use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lading::application::ports::TextExtractor;
use lading::application::services::{
    DocumentAggregator, DocumentProcessingService, FieldExtractionService, ProcessingOptions,
};
use lading::domain::DocumentKind;
use lading::infrastructure::forms::FormSubmitterFactory;
use lading::infrastructure::llm::OpenAiClient;
use lading::infrastructure::observability::{TracingConfig, init_tracing};
use lading::infrastructure::text_processing::{PdfAdapter, SpreadsheetAdapter};
use lading::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    if settings.llm.api_key.is_empty() {
        tracing::warn!("No LLM API key configured, model calls will be rejected upstream");
    }

    let llm_client = Arc::new(OpenAiClient::from_settings(&settings.llm)?);
    tracing::info!(model = llm_client.model(), "LLM client ready");

    let pdf_adapter: Arc<dyn TextExtractor> = Arc::new(PdfAdapter::new());
    let spreadsheet_adapter: Arc<dyn TextExtractor> = Arc::new(SpreadsheetAdapter::new());
    let aggregator = Arc::new(
        DocumentAggregator::new(vec![
            (DocumentKind::Pdf, pdf_adapter),
            (DocumentKind::Spreadsheet, spreadsheet_adapter),
        ])
        .with_allowed_extensions(&settings.extraction.allowed_extensions),
    );

    let field_extraction = Arc::new(FieldExtractionService::new(Arc::clone(&llm_client)));
    let form_submitter = FormSubmitterFactory::create(&settings.form)?;

    let processing_service = Arc::new(DocumentProcessingService::new(
        aggregator,
        field_extraction,
        form_submitter,
        ProcessingOptions {
            unrecognized_policy: settings.extraction.unrecognized_policy,
            staging_root: settings.extraction.staging_dir.clone(),
        },
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server host/port")?;

    let router = create_router(AppState::new(processing_service, settings));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

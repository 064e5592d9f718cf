use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use regulens::infrastructure::llm::create_gemini_client;
use regulens::infrastructure::observability::{TracingConfig, init_tracing};
use regulens::infrastructure::text_processing::CompositeFileLoader;
use regulens::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    if settings.llm.api_key.trim().is_empty() {
        tracing::warn!("APP_LLM__API_KEY is not set; analysis requests will fail");
    }

    let file_loader = Arc::new(CompositeFileLoader::with_default_loaders());
    let analysis_client =
        Arc::new(create_gemini_client(&settings.llm).context("Failed to build analysis client")?);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState::new(file_loader, analysis_client, settings);
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}

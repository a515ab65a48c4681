use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use research_assistant::{
    config::Config,
    llm::GeminiAdapter,
    research::ResearchService,
    routes::create_router,
    utils::init_logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);
    info!(
        api_url = %config.gemini.api_url,
        max_attempts = config.gemini.max_attempts,
        strict_operations = config.processing.strict_operations,
        "Gemini gateway configured"
    );

    let gemini = GeminiAdapter::from_config(&config.gemini)
        .map_err(|e| anyhow::anyhow!("Failed to build Gemini client: {}", e))?;
    let research = ResearchService::new(Arc::new(gemini), config.processing.strict_operations);

    // Create shared state
    let state = research_assistant::AppState {
        config: config.clone(),
        research: Arc::new(research),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

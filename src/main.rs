use template_translator::bootstrap;
use template_translator::config::Config;
use template_translator::infrastructure::http::router::build_router;
use template_translator::infrastructure::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing and metrics
    let _observability = observability::init(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize observability: {}", e))?;
    tracing::info!("Configuration loaded");

    // Build application state
    let state = bootstrap::build_app_state(&config)?;

    // Build router
    let app = build_router(state);

    // Start server
    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

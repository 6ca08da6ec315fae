use daily_business_analytics::{
    api::start_server,
    config::PipelineConfig,
    llm::{GeminiClient, ModelClient, StaticModel},
    pipeline::Pipeline,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = PipelineConfig::from_env();

    let api_port = daily_business_analytics::config::api_port_from_env()?;

    let model: Arc<dyn ModelClient> = if config.model.api_key.is_empty() {
        eprintln!("GEMINI_API_KEY not set in .env; serving with the deterministic stand-in model");
        Arc::new(StaticModel::default())
    } else {
        Arc::new(GeminiClient::new(
            config.model.api_key.clone(),
            config.model.timeout,
        ))
    };

    let pipeline = Arc::new(Pipeline::new(model, config));

    info!("Daily Business Analytics - API Server");
    info!("Port: {}", api_port);

    start_server(pipeline, api_port).await?;

    Ok(())
}

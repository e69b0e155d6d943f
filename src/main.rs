use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use chatbot_server::config::AppConfig;
use chatbot_server::gateway::{GenerationConfig, OpenAiClient};
use chatbot_server::routes::configure_routes;
use chatbot_server::service::ConversationService;
use chatbot_server::store::{PostgresStore, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let store_config = StoreConfig::from_connection_string(&config.database_url)?;
    let store = PostgresStore::new(store_config).await?;

    let gateway = OpenAiClient::new(
        config.openai_base_url,
        config.openai_api_key,
        config.model,
        GenerationConfig::default(),
    )?;

    let service = Arc::new(ConversationService::new(
        Arc::new(store),
        Box::new(gateway),
    ));

    let routes = configure_routes(service);

    info!(port = config.port, "starting chatbot server");
    warp::serve(routes).run(([0, 0, 0, 0], config.port)).await;

    Ok(())
}

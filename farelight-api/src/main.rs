use std::net::SocketAddr;
use std::sync::Arc;

use farelight_api::{app, AppState};
use farelight_chat::{ChatOrchestrator, FlightSearchTool, LlmClient, LlmClientConfig};
use farelight_engine::{EngineConfig, FlightQueryEngine};
use farelight_store::{app_config::Config, FlightDataset};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farelight_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Farelight API on port {}", config.server.port);

    // A broken or missing dataset is a startup failure, never a per-query one.
    let dataset = FlightDataset::load(&config.dataset.path)
        .await
        .expect("Failed to load flight dataset");
    let records = Arc::new(dataset.into_records());

    let engine = FlightQueryEngine::new(EngineConfig {
        default_limit: config.search.default_limit,
        max_limit: config.search.max_limit,
    });

    let llm = LlmClient::new(LlmClientConfig {
        base_url: config.llm.base_url.clone(),
        model: config.llm.model.clone(),
        api_key: config.llm.api_key.clone(),
        request_timeout_ms: config.llm.request_timeout_ms,
        temperature: config.llm.temperature,
        max_output_tokens: config.llm.max_output_tokens,
    })
    .expect("Failed to build LLM client");

    let tool = FlightSearchTool::new(engine.clone(), Arc::clone(&records));
    let chat = ChatOrchestrator::new(llm, tool, config.llm.max_tool_rounds);

    let app_state = AppState {
        records,
        engine: Arc::new(engine),
        chat: Arc::new(chat),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

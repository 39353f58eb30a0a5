pub mod client;
pub mod orchestrator;
pub mod prompt;
pub mod tool;

pub use client::{LlmClient, LlmClientConfig};
pub use orchestrator::{ChatMessage, ChatOrchestrator, ChatReply, ChatRole, ToolInvocation};
pub use tool::FlightSearchTool;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("LLM transport error: {0}")]
    Transport(String),
    #[error("LLM endpoint returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Model output missing assistant content")]
    MalformedResponse,
    #[error("Invalid tool arguments: {0}")]
    InvalidToolArguments(String),
    #[error("Model kept requesting tools after {0} rounds")]
    ToolRoundsExhausted(usize),
}

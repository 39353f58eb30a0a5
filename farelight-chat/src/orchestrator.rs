use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::LlmClient;
use crate::prompt::SYSTEM_PROMPT;
use crate::tool::{FlightSearchTool, SEARCH_FLIGHTS_TOOL};
use crate::ChatError;

/// One turn of the incoming conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A tool invocation recorded for the reply payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// Final assistant text plus the trace of tool calls that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub tool_calls: Vec<ToolInvocation>,
}

/// Drives the model/tool loop for one conversational request.
///
/// The model's decision of when and with what arguments to call the tool is
/// external and non-deterministic; everything on this side of that boundary
/// (message assembly, call parsing, dispatch, round bounding) is plain code.
pub struct ChatOrchestrator {
    llm: LlmClient,
    tool: FlightSearchTool,
    max_tool_rounds: usize,
}

impl ChatOrchestrator {
    pub fn new(llm: LlmClient, tool: FlightSearchTool, max_tool_rounds: usize) -> Self {
        Self {
            llm,
            tool,
            max_tool_rounds,
        }
    }

    /// Run the model until it stops requesting tools, then hand back its text.
    pub async fn respond(&self, conversation: &[ChatMessage]) -> Result<ChatReply, ChatError> {
        let mut messages = assemble_messages(conversation);
        let tools = vec![FlightSearchTool::definition()];
        let mut trace: Vec<ToolInvocation> = Vec::new();

        for _round in 0..self.max_tool_rounds {
            let raw = self.llm.chat(&messages, &tools).await?;
            let calls = parse_tool_calls(&raw);

            if calls.is_empty() {
                let text = extract_assistant_text(&raw).ok_or(ChatError::MalformedResponse)?;
                return Ok(ChatReply {
                    reply: text,
                    tool_calls: trace,
                });
            }

            // Echo the assistant tool-call turn, then answer each call.
            messages.push(assistant_tool_turn(&calls));
            for call in calls {
                let output = self.dispatch(&call);
                info!(target = "chat_orch", tool = %call.name, "tool invocation finished");
                messages.push(json!({
                    "role": "tool",
                    "tool_call_id": call.id,
                    "content": output,
                }));
                trace.push(call);
            }
        }

        warn!(target = "chat_orch", rounds = self.max_tool_rounds, "tool round limit reached");
        Err(ChatError::ToolRoundsExhausted(self.max_tool_rounds))
    }

    /// Tool failures flow back to the model as result text; only transport
    /// failures abort the conversation turn.
    fn dispatch(&self, call: &ToolInvocation) -> String {
        if call.name != SEARCH_FLIGHTS_TOOL {
            warn!(target = "chat_orch", tool = %call.name, "unknown tool requested");
            return format!("Unknown tool: {}", call.name);
        }
        match self.tool.execute(&call.arguments) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(target = "chat_orch", error = %e, "tool execution failed");
                format!("Tool error: {e}")
            }
        }
    }
}

/// Prepend the system prompt and flatten the incoming turns to wire shape.
pub fn assemble_messages(conversation: &[ChatMessage]) -> Vec<Value> {
    let mut messages = vec![json!({ "role": "system", "content": SYSTEM_PROMPT })];
    for turn in conversation {
        messages.push(json!({ "role": turn.role, "content": turn.content }));
    }
    messages
}

fn assistant_tool_turn(calls: &[ToolInvocation]) -> Value {
    json!({
        "role": "assistant",
        "content": Value::Null,
        "tool_calls": calls
            .iter()
            .map(|call| {
                json!({
                    "id": call.id,
                    "type": "function",
                    "function": {
                        "name": call.name,
                        "arguments": call.arguments.to_string(),
                    }
                })
            })
            .collect::<Vec<_>>(),
    })
}

/// Normalize tool calls out of a chat-completions response. Arguments arrive
/// either as a JSON-encoded string or as a plain object depending on the
/// serving stack; both shapes are accepted.
pub fn parse_tool_calls(raw: &Value) -> Vec<ToolInvocation> {
    let mut calls = Vec::new();
    let Some(tool_calls) = raw
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("tool_calls"))
        .and_then(|t| t.as_array())
    else {
        return calls;
    };

    for tc in tool_calls {
        let Some(function) = tc.get("function") else {
            continue;
        };
        let name = function
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or("")
            .to_string();
        if name.is_empty() {
            continue;
        }
        let id = tc
            .get("id")
            .and_then(|i| i.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("call_{}", Uuid::new_v4().simple()));
        let arguments = match function.get("arguments") {
            Some(Value::String(s)) => serde_json::from_str(s).unwrap_or_else(|_| json!({})),
            Some(v) => v.clone(),
            None => json!({}),
        };
        calls.push(ToolInvocation { id, name, arguments });
    }
    calls
}

pub fn extract_assistant_text(raw: &Value) -> Option<String> {
    raw.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

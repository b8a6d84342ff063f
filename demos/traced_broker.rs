//! Broker tracing demonstration
//!
//! This example runs a conversation turn through [`LlmBroker`] with a
//! scripted gateway standing in for a real provider, and captures every
//! emitted event in a [`MemorySink`] bank. When the turn finishes it prints
//! the captured trace: the LLM call, its completion, the tool execution the
//! model requested, and the follow-up call, all linked into one causal tree.
//!
//! # Running the example
//!
//! ```bash
//! cargo run --example traced_broker
//! ```

use async_trait::async_trait;
use cadenza::events::{EventLogger, MemorySink, Severity};
use cadenza::llm::{
    CompletionConfig, CurrentDateTimeTool, LlmBroker, LlmGateway, LlmMessage, LlmResponse,
    LlmToolCall, LlmTool,
};
use cadenza::Result;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

/// Stands in for a provider adapter: first asks for the datetime tool, then
/// answers with text.
struct ScriptedGateway {
    responses: Mutex<Vec<LlmResponse>>,
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(
        &self,
        _model: &str,
        _messages: &[LlmMessage],
        _tools: Option<&[Box<dyn LlmTool>]>,
        _config: &CompletionConfig,
    ) -> Result<LlmResponse> {
        Ok(self.responses.lock().unwrap().remove(0))
    }

    async fn complete_json(
        &self,
        _model: &str,
        _messages: &[LlmMessage],
        _schema: Value,
        _config: &CompletionConfig,
    ) -> Result<Value> {
        Ok(Value::Null)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let gateway = Arc::new(ScriptedGateway {
        responses: Mutex::new(vec![
            LlmResponse::with_tool_calls(vec![LlmToolCall {
                id: Some("tc-1".to_string()),
                name: "get_current_datetime".to_string(),
                arguments: Map::new(),
            }]),
            LlmResponse::text("The current time is on its way above."),
        ]),
    });

    // One shared sink for every level keeps the trace in emission order.
    let sink = Arc::new(MemorySink::new());
    let mut logger = EventLogger::new(Severity::Debug);
    for level in Severity::ALL {
        logger = logger.with_sink(level, sink.clone());
    }

    let broker = LlmBroker::new("pearl-9b", gateway).with_logger(Arc::new(logger));
    let tools: Vec<Box<dyn LlmTool>> = vec![Box::new(CurrentDateTimeTool)];

    let answer = broker
        .generate(&[LlmMessage::user("What time is it?")], Some(&tools), None)
        .await?;

    println!("answer: {}\n", answer);
    println!("trace ({} events):", sink.len());
    for line in sink.lines() {
        println!("  {}", line);
    }

    Ok(())
}

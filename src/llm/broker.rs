//! Broker coordinating LLM completions and tool execution
//!
//! The broker is where the event subsystem meets the model-calling path: it
//! emits an `LLM_CALL` event immediately before handing a conversation to the
//! gateway and an `LLM_COMPLETION` event immediately after, linked to the
//! call by `parent_id`. Tool executions requested by the model are traced the
//! same way, chained under the completion that requested them, so a whole
//! conversation turn reconstructs as one causal tree.

use crate::error::Result;
use crate::events::{Event, EventData, EventLogger, EventType, Severity};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmMessage, LlmResponse, LlmToolCall, MessageRole};
use crate::llm::tools::LlmTool;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

fn to_payload(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Main interface for LLM interactions
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
    logger: Option<Arc<EventLogger>>,
}

impl LlmBroker {
    /// Create a new LLM broker emitting events through the process-wide
    /// logging pipeline
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
            logger: None,
        }
    }

    /// Emit events through a specific logging pipeline instead of the
    /// process-wide one
    pub fn with_logger(mut self, logger: Arc<EventLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    fn emit(&self, event: &Event) {
        match &self.logger {
            Some(logger) => event.log_to(logger),
            None => event.log(),
        }
    }

    fn call_payload(
        &self,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Map<String, Value> {
        let mut payload = to_payload(json!({
            "model": self.model,
            "messageCount": messages.len(),
            "temperature": config.temperature,
        }));
        if let Some(tools) = tools {
            let names: Vec<Value> =
                tools.iter().map(|t| Value::String(t.name().to_string())).collect();
            payload.insert("tools".to_string(), Value::Array(names));
        }
        payload
    }

    fn emit_completion(&self, call_id: &str, payload: Map<String, Value>) -> Event {
        let completion = Event::with_data(
            EventType::LlmCompletion,
            EventData {
                parent_id: Some(call_id.to_string()),
                payload: Some(payload),
                ..Default::default()
            },
        );
        self.emit(&completion);
        completion
    }

    fn emit_failed_completion(&self, call_id: &str, error: &str, duration_ms: f64) {
        self.emit(&Event::with_data(
            EventType::LlmCompletion,
            EventData {
                parent_id: Some(call_id.to_string()),
                severity: Some(Severity::Error),
                payload: Some(to_payload(json!({
                    "model": self.model,
                    "durationMs": duration_ms,
                    "error": error,
                }))),
                ..Default::default()
            },
        ));
    }

    /// Generate a text response from the LLM
    ///
    /// When the model answers with tool calls and matching tools were
    /// provided, the broker executes them, appends the results to the
    /// conversation, and calls the model again until it produces text.
    pub async fn generate(
        &self,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: Option<CompletionConfig>,
    ) -> Result<String> {
        let config = config.unwrap_or_default();
        let current_messages = messages.to_vec();

        let call = Event::with_data(
            EventType::LlmCall,
            EventData {
                payload: Some(self.call_payload(&current_messages, tools, &config)),
                ..Default::default()
            },
        );
        self.emit(&call);

        let started = Instant::now();
        let result =
            self.gateway.complete(&self.model, &current_messages, tools, &config).await;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.emit_failed_completion(call.id(), &e.to_string(), duration_ms);
                return Err(e);
            }
        };

        let completion = self.emit_completion(
            call.id(),
            to_payload(json!({
                "model": self.model,
                "durationMs": duration_ms,
                "contentLength": response.content.as_deref().map(str::len).unwrap_or(0),
                "toolCallCount": response.tool_calls.len(),
            })),
        );

        if !response.tool_calls.is_empty() {
            if let Some(tools) = tools {
                return Box::pin(self.handle_tool_calls(
                    current_messages,
                    response,
                    completion.id().to_string(),
                    tools,
                    &config,
                ))
                .await;
            }
            warn!("LLM requested tool calls but no tools were provided");
        }

        Ok(response.content.unwrap_or_default())
    }

    fn handle_tool_calls<'a>(
        &'a self,
        mut messages: Vec<LlmMessage>,
        response: LlmResponse,
        completion_id: String,
        tools: &'a [Box<dyn LlmTool>],
        config: &'a CompletionConfig,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            info!("Tool calls requested: {}", response.tool_calls.len());

            for tool_call in &response.tool_calls {
                if let Some(tool) = tools.iter().find(|t| t.matches(&tool_call.name)) {
                    info!("Executing tool: {}", tool_call.name);

                    let output = self.run_tool(tool.as_ref(), tool_call, &completion_id)?;

                    // Record the model's request and the tool's answer, then
                    // hand the conversation back to the model.
                    messages.push(LlmMessage {
                        role: MessageRole::Assistant,
                        content: None,
                        tool_calls: Some(vec![tool_call.clone()]),
                    });
                    messages.push(LlmMessage::tool_result(
                        tool_call,
                        serde_json::to_string(&output)?,
                    ));

                    return self.generate(&messages, Some(tools), Some(config.clone())).await;
                } else {
                    warn!("Tool not found: {}", tool_call.name);
                }
            }

            Ok(response.content.unwrap_or_default())
        })
    }

    fn run_tool(
        &self,
        tool: &dyn LlmTool,
        tool_call: &LlmToolCall,
        completion_id: &str,
    ) -> Result<Value> {
        let call_event = Event::with_data(
            EventType::ToolCall,
            EventData {
                parent_id: Some(completion_id.to_string()),
                payload: Some(to_payload(json!({
                    "tool": tool_call.name,
                    "arguments": Value::Object(tool_call.arguments.clone()),
                }))),
                ..Default::default()
            },
        );
        self.emit(&call_event);

        let started = Instant::now();
        let result = tool.run(&tool_call.arguments);
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(_) => self.emit(&Event::with_data(
                EventType::ToolCompletion,
                EventData {
                    parent_id: Some(call_event.id().to_string()),
                    payload: Some(to_payload(json!({
                        "tool": tool_call.name,
                        "durationMs": duration_ms,
                    }))),
                    ..Default::default()
                },
            )),
            Err(e) => self.emit(&Event::with_data(
                EventType::ToolCompletion,
                EventData {
                    parent_id: Some(call_event.id().to_string()),
                    severity: Some(Severity::Error),
                    payload: Some(to_payload(json!({
                        "tool": tool_call.name,
                        "durationMs": duration_ms,
                        "error": e.to_string(),
                    }))),
                    ..Default::default()
                },
            )),
        }

        result
    }

    /// Generate a structured object response from the LLM
    pub async fn generate_object<T>(
        &self,
        messages: &[LlmMessage],
        config: Option<CompletionConfig>,
    ) -> Result<T>
    where
        T: for<'de> Deserialize<'de> + Serialize + schemars::JsonSchema + Send,
    {
        let config = config.unwrap_or_default();
        let schema = serde_json::to_value(schemars::schema_for!(T))?;

        let call = Event::with_data(
            EventType::LlmCall,
            EventData {
                payload: Some(to_payload(json!({
                    "model": self.model,
                    "messageCount": messages.len(),
                    "temperature": config.temperature,
                    "structured": true,
                }))),
                ..Default::default()
            },
        );
        self.emit(&call);

        let started = Instant::now();
        let result = self.gateway.complete_json(&self.model, messages, schema, &config).await;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(value) => {
                self.emit_completion(
                    call.id(),
                    to_payload(json!({
                        "model": self.model,
                        "durationMs": duration_ms,
                        "structured": true,
                    })),
                );
                Ok(serde_json::from_value(value)?)
            }
            Err(e) => {
                self.emit_failed_completion(call.id(), &e.to_string(), duration_ms);
                Err(e)
            }
        }
    }
}

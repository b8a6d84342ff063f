//! Message and response types shared by all chat-completion providers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message role in an LLM conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmToolCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub arguments: Map<String, Value>,
}

/// One message in an LLM conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: MessageRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<LlmToolCall>>,
}

impl LlmMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// Create a tool-result message answering a specific tool call
    pub fn tool_result(call: &LlmToolCall, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: Some(content.into()),
            tool_calls: Some(vec![call.clone()]),
        }
    }
}

/// Response from a chat-completion provider
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<LlmToolCall>,
}

impl LlmResponse {
    /// A plain text response with no tool calls
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// A response requesting tool invocations
    pub fn with_tool_calls(tool_calls: Vec<LlmToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_role_serialization() {
        assert_eq!(serde_json::to_string(&MessageRole::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&MessageRole::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&MessageRole::Tool).unwrap(), "\"tool\"");
    }

    #[test]
    fn test_user_message() {
        let msg = LlmMessage::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, Some("Hello".to_string()));
        assert!(msg.tool_calls.is_none());
    }

    #[test]
    fn test_system_message() {
        let msg = LlmMessage::system("You are a helpful assistant");
        assert_eq!(msg.role, MessageRole::System);
        assert_eq!(msg.content, Some("You are a helpful assistant".to_string()));
    }

    #[test]
    fn test_assistant_message() {
        let msg = LlmMessage::assistant("I can help with that");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.content, Some("I can help with that".to_string()));
    }

    #[test]
    fn test_tool_result_message() {
        let call = LlmToolCall {
            id: Some("call-1".to_string()),
            name: "clock".to_string(),
            arguments: Map::new(),
        };

        let msg = LlmMessage::tool_result(&call, r#"{"datetime":"2024-01-01"}"#);
        assert_eq!(msg.role, MessageRole::Tool);
        assert_eq!(msg.tool_calls.unwrap()[0].name, "clock");
    }

    #[test]
    fn test_tool_call_serialization_skips_missing_id() {
        let call = LlmToolCall {
            id: None,
            name: "search".to_string(),
            arguments: [("query".to_string(), json!("rust"))].into_iter().collect(),
        };

        let json = serde_json::to_string(&call).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(json.contains("\"query\":\"rust\""));
    }

    #[test]
    fn test_response_helpers() {
        let text = LlmResponse::text("done");
        assert_eq!(text.content, Some("done".to_string()));
        assert!(text.tool_calls.is_empty());

        let calls = LlmResponse::with_tool_calls(vec![LlmToolCall {
            id: None,
            name: "clock".to_string(),
            arguments: Map::new(),
        }]);
        assert!(calls.content.is_none());
        assert_eq!(calls.tool_calls.len(), 1);
    }
}

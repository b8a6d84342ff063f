//! Tool contract for function-calling models

use crate::error::Result;
use serde_json::{json, Map, Value};

/// Provider-neutral descriptor advertising a tool to the model
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDescriptor {
    pub r#type: String,
    pub function: FunctionDescriptor,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Trait for tools the model may invoke during a completion
pub trait LlmTool: Send + Sync {
    /// Name the model uses to invoke the tool
    fn name(&self) -> &str;

    /// What the tool does, phrased for the model
    fn description(&self) -> &str;

    /// JSON schema of the tool's arguments
    fn parameters(&self) -> Value;

    /// Execute the tool with the arguments supplied by the model
    fn run(&self, args: &Map<String, Value>) -> Result<Value>;

    /// Assemble the descriptor sent to the provider
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            r#type: "function".to_string(),
            function: FunctionDescriptor {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters(),
            },
        }
    }

    /// Check if this tool answers to the given name
    fn matches(&self, name: &str) -> bool {
        self.name() == name
    }
}

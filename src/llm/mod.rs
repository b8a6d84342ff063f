pub mod broker;
pub mod gateway;
pub mod models;
pub mod tools;

pub use broker::LlmBroker;
pub use gateway::{CompletionConfig, LlmGateway};
pub use models::{LlmMessage, LlmResponse, LlmToolCall, MessageRole};
pub use tools::{CurrentDateTimeTool, FunctionDescriptor, LlmTool, ToolDescriptor};

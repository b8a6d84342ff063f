pub mod error;
pub mod events;
pub mod llm;

pub use error::{CadenzaError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{CadenzaError, Result};
    pub use crate::events::{Event, EventData, EventLogger, EventSink, EventType, Severity};
    pub use crate::llm::tools::{FunctionDescriptor, LlmTool, ToolDescriptor};
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, MessageRole};
}

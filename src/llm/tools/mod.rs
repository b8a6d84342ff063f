pub mod current_datetime;
pub mod tool;

pub use current_datetime::CurrentDateTimeTool;
pub use tool::{FunctionDescriptor, LlmTool, ToolDescriptor};

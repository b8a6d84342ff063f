//! Tool for reading the current date and time
//!
//! The one tool the library ships with. It needs no I/O or credentials, which
//! makes it a convenient way to exercise the tool-calling path end to end.

use crate::error::Result;
use crate::llm::tools::LlmTool;
use chrono::Local;
use serde_json::{json, Map, Value};

/// Answers with the current datetime, optionally in a caller-supplied format
#[derive(Debug, Default)]
pub struct CurrentDateTimeTool;

impl CurrentDateTimeTool {
    pub fn new() -> Self {
        Self
    }
}

impl LlmTool for CurrentDateTimeTool {
    fn name(&self) -> &str {
        "get_current_datetime"
    }

    fn description(&self) -> &str {
        "Get the current date and time. Useful when you need to know the current time or date."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "format_string": {
                    "type": "string",
                    "description": "strftime format for the datetime, e.g. '%Y-%m-%d %H:%M:%S' or '%A, %B %d, %Y'"
                }
            },
            "required": []
        })
    }

    fn run(&self, args: &Map<String, Value>) -> Result<Value> {
        let format_string = args
            .get("format_string")
            .and_then(|v| v.as_str())
            .unwrap_or("%Y-%m-%d %H:%M:%S");

        let now = Local::now();

        Ok(json!({
            "datetime": now.format(format_string).to_string(),
            "timestamp": now.timestamp(),
            "timezone": now.offset().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let result = CurrentDateTimeTool.run(&Map::new()).unwrap();

        let datetime = result["datetime"].as_str().unwrap();
        assert_eq!(datetime.len(), "2024-01-01 00:00:00".len());
        assert!(result["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_custom_format() {
        let args: Map<String, Value> =
            [("format_string".to_string(), json!("%Y"))].into_iter().collect();

        let result = CurrentDateTimeTool.run(&args).unwrap();
        let year: i32 = result["datetime"].as_str().unwrap().parse().unwrap();
        assert!(year >= 2024);
    }

    #[test]
    fn test_descriptor() {
        let descriptor = CurrentDateTimeTool.descriptor();
        assert_eq!(descriptor.function.name, "get_current_datetime");
        assert!(CurrentDateTimeTool.matches("get_current_datetime"));
    }
}

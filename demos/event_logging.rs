//! Structured event logging demonstration
//!
//! This example walks through the event API directly: constructing events,
//! chaining them causally, serializing them for a later run, and emitting
//! them through a severity-filtered pipeline.
//!
//! # Running the example
//!
//! ```bash
//! CADENZA_LOG_LEVEL=debug RUST_LOG=cadenza=debug cargo run --example event_logging
//! ```
//!
//! Try `CADENZA_LOG_LEVEL=warning` to watch the INFO events disappear, or an
//! invalid value such as `verbose` to see the fail-fast configuration error.

use cadenza::events::{self, Event, EventData, EventType, Severity};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Resolve the process-wide pipeline up front so a bad override in the
    // environment stops us here, with a readable error, instead of later.
    let logger = events::logger::init()?;
    println!("Emitting at threshold {} and above\n", logger.threshold());

    // A call event with an open-schema payload.
    let call = Event::with_data(
        EventType::LlmCall,
        EventData {
            payload: Some(
                json!({
                    "model": "pearl-9b",
                    "messageCount": 2,
                    "temperature": 0.7,
                })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            ),
            ..Default::default()
        },
    );
    call.log();

    // The completion chains to the call through parent_id.
    let completion = Event::with_data(
        EventType::LlmCompletion,
        EventData {
            parent_id: Some(call.id().to_string()),
            payload: Some(
                json!({"durationMs": 152.7, "contentLength": 512})
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
            ),
            severity: Some(Severity::Debug),
            ..Default::default()
        },
    );
    completion.log();

    // Events round-trip through JSON, so a trace can be persisted in one run
    // and reconstructed in another. The causal link travels with the record.
    let record = completion.to_json()?;
    println!("serialized: {}", record);

    let restored = Event::from_json(&record)?;
    assert_eq!(restored, completion);
    println!("restored:   {}", restored);
    println!("parent:     {:?}", restored.parent_id());

    Ok(())
}

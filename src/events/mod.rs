//! Structured event model and severity-filtered logging pipeline
//!
//! This module is the observability core of the library. Callers construct an
//! immutable [`Event`] for each notable occurrence (an LLM call going out, a
//! completion coming back, a tool execution) and either serialize it for
//! later analysis or emit it through the logging pipeline.
//!
//! # Architecture
//!
//! - **Event**: immutable record with a type tag, unique id, causal parent
//!   link, UTC timestamp, open-schema payload, severity, and schema version
//! - **Severity**: ordinal level used both to classify events and to filter
//!   emission
//! - **EventLogger**: process-scoped threshold plus one sink per severity
//!   level; events below the threshold are silently dropped
//! - **EventSink**: per-severity output channel ([`TracingSink`] by default,
//!   [`MemorySink`] for tests and embedders)
//!
//! # Causal chaining
//!
//! Each event id can be passed as the `parent_id` of a later event, linking
//! cause to effect: a completion points at the call that produced it, a tool
//! execution points at the completion that requested it. The resulting forest
//! reconstructs call hierarchies from serialized records alone, across
//! process boundaries. Nothing is promised about emission order between
//! concurrent callers; consumers order by timestamp and parent links.
//!
//! # Usage Example
//!
//! ```rust
//! use cadenza::events::{Event, EventData, EventType, Severity};
//!
//! let call = Event::new(EventType::LlmCall);
//! call.log();
//!
//! let completion = Event::with_data(
//!     EventType::LlmCompletion,
//!     EventData {
//!         parent_id: Some(call.id().to_string()),
//!         severity: Some(Severity::Debug),
//!         ..Default::default()
//!     },
//! );
//! completion.log();
//!
//! // Persist for a later run; the causal link travels with the record.
//! let record = completion.to_json().unwrap();
//! let restored = Event::from_json(&record).unwrap();
//! assert_eq!(restored.parent_id(), Some(call.id()));
//! ```

pub mod event;
pub mod logger;
pub mod severity;

// Re-export main types
pub use event::{Event, EventData, EventType};
pub use logger::{EventLogger, EventSink, MemorySink, TracingSink, LOG_LEVEL_ENV};
pub use severity::Severity;

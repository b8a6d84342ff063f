//! Structured events for tracing LLM interactions
//!
//! An [`Event`] is an immutable record of one notable occurrence in the
//! library: a model call going out, a completion coming back, a tool being
//! executed. Events carry a type tag, a unique id, an optional causal link to
//! the event that preceded them, a UTC timestamp, an open-schema payload, a
//! severity, and a schema version.
//!
//! Events that link to prior events via `parent_id` form a causal forest: one
//! tree per root call. The link is a soft back-reference, a plain identifier
//! value; nothing enforces that the parent is resolvable, and resolving it is
//! an external lookup, not a responsibility of this type.
//!
//! # Examples
//!
//! ```
//! use cadenza::events::{Event, EventData, EventType};
//!
//! let call = Event::new(EventType::LlmCall);
//!
//! let completion = Event::with_data(
//!     EventType::LlmCompletion,
//!     EventData {
//!         parent_id: Some(call.id().to_string()),
//!         ..Default::default()
//!     },
//! );
//!
//! assert_eq!(completion.parent_id(), Some(call.id()));
//! ```

use crate::error::{CadenzaError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use super::logger::EventLogger;
use super::severity::Severity;

/// Tags for the kinds of occurrence the library records.
///
/// The set is closed but extensible: adding a variant extends the vocabulary
/// without touching any existing record, and older serialized records remain
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// An LLM request is about to be issued.
    LlmCall,
    /// An LLM request finished, successfully or not.
    LlmCompletion,
    /// A tool is about to be executed on behalf of the model.
    ToolCall,
    /// A tool execution finished, successfully or not.
    ToolCompletion,
}

impl EventType {
    /// Canonical wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::LlmCall => "LLM_CALL",
            EventType::LlmCompletion => "LLM_COMPLETION",
            EventType::ToolCall => "TOOL_CALL",
            EventType::ToolCompletion => "TOOL_COMPLETION",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional fields for constructing an [`Event`].
///
/// Each field is independently optional; anything left `None` takes the
/// documented default at construction time.
#[derive(Debug, Clone, Default)]
pub struct EventData {
    /// Id of the causally preceding event, if any.
    pub parent_id: Option<String>,
    /// Explicit id; a fresh UUID v4 is generated when absent.
    pub id: Option<String>,
    /// Explicit timestamp; construction time when absent.
    pub timestamp: Option<DateTime<Utc>>,
    /// Initial payload; empty when absent.
    pub payload: Option<Map<String, Value>>,
    /// Severity; [`Severity::Info`] when absent.
    pub severity: Option<Severity>,
    /// Schema version; 1 when absent.
    pub version: Option<u32>,
}

/// Canonical serialized form of an event.
///
/// Every field other than `type` is optional on the way in, so records
/// written by older producers (or hand-trimmed ones) reconstruct with the
/// same defaults as direct construction. Unknown fields from future versions
/// are ignored rather than rejected.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    payload: Option<Map<String, Value>>,
    severity: Option<Severity>,
    version: Option<u32>,
}

/// An immutable record of a single notable occurrence.
///
/// Events are plain values: freshly allocated at construction, never mutated
/// afterwards, and not retained anywhere by the library. The payload is owned
/// by the event from the moment of construction, so later changes to the
/// caller's own data cannot retroactively alter a recorded event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    event_type: EventType,
    parent_id: Option<String>,
    id: String,
    timestamp: DateTime<Utc>,
    payload: Map<String, Value>,
    severity: Severity,
    version: u32,
}

impl Event {
    /// Default schema version for newly constructed events.
    pub const CURRENT_VERSION: u32 = 1;

    /// Construct an event with all defaults: fresh id, timestamp of now,
    /// empty payload, INFO severity, current version.
    pub fn new(event_type: EventType) -> Self {
        Self::with_data(event_type, EventData::default())
    }

    /// Construct an event, filling defaults for any field left `None`.
    ///
    /// This is the single construction path: deserialization funnels through
    /// it too, so defaulting rules apply uniformly however an event comes to
    /// exist.
    pub fn with_data(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            parent_id: data.parent_id,
            id: data.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            timestamp: data.timestamp.unwrap_or_else(Utc::now),
            payload: data.payload.unwrap_or_default(),
            severity: data.severity.unwrap_or(Severity::Info),
            version: data.version.unwrap_or(Self::CURRENT_VERSION),
        }
    }

    /// The type tag.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Id of the causally preceding event, if any.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Unique identifier of this event.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The open-schema payload.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Severity of the event.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Schema version the event was written against.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Serialize to the canonical JSON record.
    ///
    /// The timestamp is encoded as an RFC 3339 UTC string, so records sort
    /// lexically and round-trip to the exact instant. `from_json(to_json(e))`
    /// equals `e` in every field.
    pub fn to_json(&self) -> Result<String> {
        let record = EventRecord {
            event_type: self.event_type,
            parent_id: self.parent_id.clone(),
            id: Some(self.id.clone()),
            timestamp: Some(self.timestamp),
            payload: Some(self.payload.clone()),
            severity: Some(self.severity),
            version: Some(self.version),
        };
        Ok(serde_json::to_string(&record)?)
    }

    /// Reconstruct an event from its canonical JSON record.
    ///
    /// Fails with [`CadenzaError::ParseError`] when the text is not a valid
    /// record. Fields the record omits take the construction defaults;
    /// unrecognized fields are ignored for forward compatibility across
    /// `version` values.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: EventRecord =
            serde_json::from_str(json).map_err(|e| CadenzaError::ParseError(e.to_string()))?;

        Ok(Self::with_data(
            record.event_type,
            EventData {
                parent_id: record.parent_id,
                id: record.id,
                timestamp: record.timestamp,
                payload: record.payload,
                severity: record.severity,
                version: record.version,
            },
        ))
    }

    /// Emit this event through the process-wide logging pipeline.
    ///
    /// A no-op when the event's severity is below the configured threshold.
    /// See [`crate::events::logger::init`] for how the process-wide pipeline
    /// is resolved.
    pub fn log(&self) {
        self.log_to(super::logger::global());
    }

    /// Emit this event through a specific logging pipeline.
    pub fn log_to(&self, logger: &EventLogger) {
        logger.log(self);
    }
}

impl fmt::Display for Event {
    /// One-line human-oriented summary, suitable for a log line.
    ///
    /// Diagnostic output only; not guaranteed parseable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event {{ type: {}, parentId: {}, id: {}, timestamp: {}, payload: {}, severity: {} }}",
            self.event_type,
            self.parent_id.as_deref().unwrap_or("-"),
            self.id,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            Value::Object(self.payload.clone()),
            self.severity,
        )
    }
}

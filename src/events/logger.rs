//! Severity-filtered logging pipeline for events
//!
//! The pipeline is a threshold plus a bank of per-severity sinks. Deciding
//! whether an event is emitted is a pure comparison ([`EventLogger::should_emit`]);
//! the only side effect in the whole subsystem is the single write of the
//! rendered line to the sink registered for the event's own level.
//!
//! The pipeline is explicit state, not a hidden mutable global: tests and
//! embedders construct independent [`EventLogger`] instances with their own
//! thresholds and sinks, while [`init`] resolves one process-wide instance
//! from the environment, exactly once, for [`Event::log`](super::Event::log)
//! to use.

use crate::error::{CadenzaError, Result};
use std::sync::{Arc, Mutex, OnceLock};

use super::event::Event;
use super::severity::Severity;

/// Environment variable naming the minimum severity to emit.
///
/// Unset means [`Severity::Info`]. An unrecognized value is a fatal
/// configuration error, surfaced when the pipeline is resolved rather than
/// silently replaced with the default.
pub const LOG_LEVEL_ENV: &str = "CADENZA_LOG_LEVEL";

/// Output channel for rendered event lines.
///
/// One sink is registered per severity level, each independently addressable,
/// so operators can redirect or silence a single level without touching
/// calling code. Emission is fire-and-forget; sinks do not report failures
/// back into the request path.
pub trait EventSink: Send + Sync {
    /// Write one rendered event line.
    fn emit(&self, line: &str);
}

/// Default sink: forwards lines to the `tracing` ecosystem.
///
/// Each severity gets its own target (`cadenza::events::debug` through
/// `cadenza::events::critical`) at the closest `tracing` level, so standard
/// `EnvFilter` directives can enable or disable levels individually.
pub struct TracingSink {
    severity: Severity,
}

impl TracingSink {
    /// Create a sink for one severity level.
    pub fn new(severity: Severity) -> Self {
        Self { severity }
    }
}

impl EventSink for TracingSink {
    fn emit(&self, line: &str) {
        // Targets must be literals, hence one macro call per level.
        match self.severity {
            Severity::Debug => tracing::debug!(target: "cadenza::events::debug", "{}", line),
            Severity::Info => tracing::info!(target: "cadenza::events::info", "{}", line),
            Severity::Warning => tracing::warn!(target: "cadenza::events::warning", "{}", line),
            Severity::Error => tracing::error!(target: "cadenza::events::error", "{}", line),
            Severity::Critical => {
                tracing::error!(target: "cadenza::events::critical", "{}", line)
            }
        }
    }
}

/// Sink that captures rendered lines in memory.
///
/// Useful in tests and for embedders that keep their own trace of emitted
/// events.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines captured so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Number of lines captured so far.
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().unwrap().is_empty()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// The logging pipeline: a minimum severity and one sink per level.
///
/// Immutable once constructed. Changing the process-wide threshold requires a
/// restart; that is a deliberate trade of runtime reconfigurability for
/// simplicity.
pub struct EventLogger {
    threshold: Severity,
    sinks: [Arc<dyn EventSink>; 5],
}

impl std::fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLogger")
            .field("threshold", &self.threshold)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl EventLogger {
    /// Create a pipeline with the given threshold and the default
    /// [`TracingSink`] bank.
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            sinks: Severity::ALL.map(|level| Arc::new(TracingSink::new(level)) as Arc<dyn EventSink>),
        }
    }

    /// Replace the sink registered for one severity level.
    pub fn with_sink(mut self, severity: Severity, sink: Arc<dyn EventSink>) -> Self {
        self.sinks[severity as usize] = sink;
        self
    }

    /// Resolve a pipeline from the environment.
    ///
    /// Reads [`LOG_LEVEL_ENV`] case-insensitively; absent means
    /// [`Severity::Info`]. Fails with [`CadenzaError::ConfigError`] when the
    /// variable is set to something that is not a severity level.
    pub fn from_env() -> Result<Self> {
        match std::env::var(LOG_LEVEL_ENV) {
            Ok(raw) => {
                let threshold = raw.parse::<Severity>().map_err(|_| {
                    CadenzaError::ConfigError(format!(
                        "invalid value for {}: {}",
                        LOG_LEVEL_ENV, raw
                    ))
                })?;
                Ok(Self::new(threshold))
            }
            Err(_) => Ok(Self::new(Severity::Info)),
        }
    }

    /// The minimum severity this pipeline emits.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether an event of the given severity would be emitted.
    ///
    /// Pure predicate; the filtering decision is testable without any I/O.
    pub fn should_emit(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    /// Emit an event, or silently drop it if below threshold.
    ///
    /// Dropping is normal filtering, not a failure; nothing is signalled.
    pub fn log(&self, event: &Event) {
        if !self.should_emit(event.severity()) {
            return;
        }
        self.sinks[event.severity() as usize].emit(&event.to_string());
    }
}

static GLOBAL: OnceLock<EventLogger> = OnceLock::new();

/// Resolve and install the process-wide pipeline from the environment.
///
/// Call once at startup so an unrecognized [`LOG_LEVEL_ENV`] value halts
/// initialization with a descriptive error instead of surfacing later.
/// Subsequent calls return the already-installed pipeline.
pub fn init() -> Result<&'static EventLogger> {
    match GLOBAL.get() {
        Some(logger) => Ok(logger),
        None => {
            let logger = EventLogger::from_env()?;
            Ok(GLOBAL.get_or_init(|| logger))
        }
    }
}

/// Install a specific pipeline as the process-wide one.
///
/// Useful when the default `tracing` sinks are not wanted. No-op if a
/// pipeline is already installed; the installed one is returned either way.
pub fn init_with(logger: EventLogger) -> &'static EventLogger {
    GLOBAL.get_or_init(|| logger)
}

/// The process-wide pipeline, resolving it from the environment on first use.
///
/// # Panics
///
/// Panics when the pipeline has not been installed yet and [`LOG_LEVEL_ENV`]
/// holds an unrecognized level: a bad override is a fatal configuration
/// error. Call [`init`] at startup to receive it as a `Result` instead.
pub fn global() -> &'static EventLogger {
    GLOBAL.get_or_init(|| match EventLogger::from_env() {
        Ok(logger) => logger,
        Err(e) => panic!("{}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::{EventData, EventType};

    fn event_with_severity(severity: Severity) -> Event {
        Event::with_data(
            EventType::LlmCall,
            EventData {
                severity: Some(severity),
                ..Default::default()
            },
        )
    }

    fn logger_with_memory_sinks(threshold: Severity) -> (EventLogger, [Arc<MemorySink>; 5]) {
        let sinks = Severity::ALL.map(|_| Arc::new(MemorySink::new()));
        let mut logger = EventLogger::new(threshold);
        for level in Severity::ALL {
            logger = logger.with_sink(level, sinks[level as usize].clone());
        }
        (logger, sinks)
    }

    #[test]
    fn test_should_emit_is_a_threshold_comparison() {
        let logger = EventLogger::new(Severity::Warning);

        assert!(!logger.should_emit(Severity::Debug));
        assert!(!logger.should_emit(Severity::Info));
        assert!(logger.should_emit(Severity::Warning));
        assert!(logger.should_emit(Severity::Error));
        assert!(logger.should_emit(Severity::Critical));
    }

    #[test]
    fn test_below_threshold_events_are_silently_dropped() {
        let (logger, sinks) = logger_with_memory_sinks(Severity::Warning);

        logger.log(&event_with_severity(Severity::Info));

        for sink in &sinks {
            assert!(sink.is_empty());
        }
    }

    #[test]
    fn test_emitted_exactly_once_to_the_sink_for_its_level() {
        let (logger, sinks) = logger_with_memory_sinks(Severity::Warning);

        logger.log(&event_with_severity(Severity::Error));

        assert_eq!(sinks[Severity::Error as usize].len(), 1);
        for level in [Severity::Debug, Severity::Info, Severity::Warning, Severity::Critical] {
            assert!(sinks[level as usize].is_empty());
        }
    }

    #[test]
    fn test_emitted_line_is_the_rendered_event() {
        let (logger, sinks) = logger_with_memory_sinks(Severity::Debug);
        let event = event_with_severity(Severity::Info);

        logger.log(&event);

        assert_eq!(sinks[Severity::Info as usize].lines(), vec![event.to_string()]);
    }

    #[test]
    fn test_independent_pipelines_do_not_interfere() {
        let (strict, strict_sinks) = logger_with_memory_sinks(Severity::Critical);
        let (lenient, lenient_sinks) = logger_with_memory_sinks(Severity::Debug);
        let event = event_with_severity(Severity::Info);

        strict.log(&event);
        lenient.log(&event);

        assert!(strict_sinks[Severity::Info as usize].is_empty());
        assert_eq!(lenient_sinks[Severity::Info as usize].len(), 1);
    }

    #[test]
    fn test_log_to_routes_through_the_given_pipeline() {
        let (logger, sinks) = logger_with_memory_sinks(Severity::Debug);

        event_with_severity(Severity::Critical).log_to(&logger);

        assert_eq!(sinks[Severity::Critical as usize].len(), 1);
    }

    // Exercised as one test because the cases share an environment variable
    // and the harness runs tests in parallel.
    #[test]
    fn test_from_env_resolution() {
        std::env::remove_var(LOG_LEVEL_ENV);
        let logger = EventLogger::from_env().unwrap();
        assert_eq!(logger.threshold(), Severity::Info);

        std::env::set_var(LOG_LEVEL_ENV, "error");
        let logger = EventLogger::from_env().unwrap();
        assert_eq!(logger.threshold(), Severity::Error);

        std::env::set_var(LOG_LEVEL_ENV, "VERBOSE");
        let err = EventLogger::from_env().unwrap_err();
        match err {
            CadenzaError::ConfigError(msg) => {
                assert!(msg.contains(LOG_LEVEL_ENV));
                assert!(msg.contains("VERBOSE"));
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }

        std::env::remove_var(LOG_LEVEL_ENV);
    }

    #[test]
    fn test_memory_sink_captures_lines() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit("first");
        sink.emit("second");

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["first".to_string(), "second".to_string()]);
    }
}

//! Application telemetry events and sinks.
//!
//! The review feed emits a handful of structured events so that load latency
//! and reconciliation decisions can be inspected while debugging. Nothing is
//! transmitted anywhere.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the review feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the outcome of an initial load.
    FeedLoaded {
        /// Number of reviews visible after the load.
        review_count: usize,
        /// Wall-clock time spent fetching, in milliseconds.
        latency_ms: u64,
        /// Whether the blended sync mode produced the list.
        blended: bool,
    },
    /// Records an optimistic local insert.
    ReviewSubmitted {
        /// Identifier of the inserted review.
        review_id: String,
    },
    /// Records the delayed re-fetch that follows a submission.
    FeedReconciled {
        /// Number of reviews visible after reconciliation.
        review_count: usize,
        /// Whether the remote snapshot replaced the local list.
        replaced: bool,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Test helpers for asserting on emitted telemetry.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every recorded event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Returns a copy of all events recorded so far.
        #[must_use]
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingTelemetrySink;
    use super::{TelemetryEvent, TelemetrySink};

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingTelemetrySink::default();
        sink.record(TelemetryEvent::ReviewSubmitted {
            review_id: "1755221400000".to_owned(),
        });

        assert_eq!(
            sink.events(),
            vec![TelemetryEvent::ReviewSubmitted {
                review_id: "1755221400000".to_owned(),
            }]
        );
    }

    #[test]
    fn events_serialise_with_snake_case_tag() {
        let event = TelemetryEvent::FeedReconciled {
            review_count: 4,
            replaced: true,
        };

        let json = serde_json::to_value(&event).expect("event should serialise");

        assert_eq!(
            json,
            serde_json::json!({"type": "feed_reconciled", "review_count": 4, "replaced": true})
        );
    }
}

//! Canned application-log producer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rand::rngs::StdRng;
use serde_json::json;
use tokio::time::sleep;

use eventflow_core::{EventProducer, ProducerError, StreamEvent};

const LEVELS: [&str; 4] = ["INFO", "DEBUG", "WARNING", "ERROR"];

const MESSAGES: [&str; 8] = [
    "Application started",
    "Database connection established",
    "Processing request",
    "Cache miss, fetching from database",
    "Request completed successfully",
    "Cleaning up temporary files",
    "Background job queued",
    "Metrics collected",
];

/// Replays canned log entries with randomized severity levels.
///
/// The random source is injected so seeded runs replay identically.
pub struct LogProducer {
    line: usize,
    interval: Duration,
    rng: StdRng,
}

impl LogProducer {
    /// Create a log producer pacing at the given interval.
    #[must_use]
    pub fn new(interval: Duration, rng: StdRng) -> Self {
        Self {
            line: 0,
            interval,
            rng,
        }
    }
}

#[async_trait]
impl EventProducer for LogProducer {
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ProducerError> {
        if self.line >= MESSAGES.len() {
            return Ok(None);
        }
        if self.line > 0 {
            sleep(self.interval).await;
        }
        let level = LEVELS[self.rng.gen_range(0..LEVELS.len())];
        self.line += 1;

        let payload = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "message": MESSAGES[self.line - 1],
            "line": self.line,
        });
        Ok(Some(StreamEvent::json(payload).with_kind("log")))
    }

    fn final_event(&mut self) -> Option<StreamEvent> {
        Some(StreamEvent::json(json!({ "status": "EOF" })).with_kind("complete"))
    }
}

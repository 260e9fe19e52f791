//! Fixed-rate counter producer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::time::sleep;

use eventflow_core::{EventProducer, ProducerError, StreamEvent};

/// Emits `update` events for counts `1..=limit`, one per interval, then a
/// `done` marker carrying the final total.
pub struct CounterProducer {
    count: u32,
    limit: u32,
    interval: Duration,
}

impl CounterProducer {
    /// Create a counter that ticks `limit` times at the given interval.
    #[must_use]
    pub const fn new(limit: u32, interval: Duration) -> Self {
        Self {
            count: 0,
            limit,
            interval,
        }
    }
}

#[async_trait]
impl EventProducer for CounterProducer {
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ProducerError> {
        if self.count >= self.limit {
            return Ok(None);
        }
        // First tick fires immediately; pacing applies between ticks.
        if self.count > 0 {
            sleep(self.interval).await;
        }
        self.count += 1;

        let payload = json!({
            "count": self.count,
            "timestamp": Utc::now().to_rfc3339(),
            "message": format!("Update #{}", self.count),
        });
        Ok(Some(StreamEvent::json(payload).with_kind("update")))
    }

    fn final_event(&mut self) -> Option<StreamEvent> {
        Some(
            StreamEvent::json(json!({ "status": "complete", "total": self.count }))
                .with_kind("done"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn yields_limit_events_then_exhausts() {
        let mut producer = CounterProducer::new(3, Duration::ZERO);
        for expected in 1..=3 {
            let event = producer.next_event().await.unwrap().unwrap();
            assert_eq!(event.kind.as_deref(), Some("update"));
            assert_eq!(event.payload["count"], expected);
        }
        assert!(producer.next_event().await.unwrap().is_none());

        let done = producer.final_event().unwrap();
        assert_eq!(done.kind.as_deref(), Some("done"));
        assert_eq!(done.payload["total"], 3);
    }
}

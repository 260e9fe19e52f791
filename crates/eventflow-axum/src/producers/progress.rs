//! Simulated progress-step producer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::time::sleep;

use eventflow_core::{EventProducer, ProducerError, StreamEvent};

const STEPS: [&str; 7] = [
    "Initializing...",
    "Loading dependencies...",
    "Processing data...",
    "Running calculations...",
    "Generating report...",
    "Finalizing...",
    "Complete!",
];

/// Walks a fixed list of progress steps, reporting percentage complete.
pub struct ProgressProducer {
    step: usize,
    interval: Duration,
}

impl ProgressProducer {
    /// Create a progress producer pacing at the given interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { step: 0, interval }
    }
}

#[async_trait]
impl EventProducer for ProgressProducer {
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ProducerError> {
        if self.step >= STEPS.len() {
            return Ok(None);
        }
        if self.step > 0 {
            sleep(self.interval).await;
        }
        self.step += 1;

        // Two decimal places, like 3/7 -> 42.86.
        let percentage = (self.step as f64 / STEPS.len() as f64 * 10000.0).round() / 100.0;
        let payload = json!({
            "step": self.step,
            "total": STEPS.len(),
            "percentage": percentage,
            "message": STEPS[self.step - 1],
            "timestamp": Utc::now().to_rfc3339(),
        });
        Ok(Some(StreamEvent::json(payload).with_kind("progress")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn percentage_reaches_exactly_one_hundred() {
        let mut producer = ProgressProducer::new(Duration::ZERO);
        let mut last = None;
        while let Some(event) = producer.next_event().await.unwrap() {
            last = Some(event);
        }
        let last = last.unwrap();
        assert_eq!(last.payload["percentage"], 100.0);
        assert_eq!(last.payload["step"], STEPS.len());
    }
}

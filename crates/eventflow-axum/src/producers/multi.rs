//! Mixed-cadence multi-kind producer.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rand::rngs::StdRng;
use serde_json::json;
use tokio::time::sleep;

use eventflow_core::{EventProducer, ProducerError, StreamEvent};

/// Round at which the canned high-memory warning is queued.
const WARNING_ROUND: u32 = 10;

/// Interleaves `status`, `metrics` and `update` events, opening with a
/// `connected` preamble and queuing a `warning` at [`WARNING_ROUND`].
///
/// Declares both a terminal `complete` event and an interrupt marker, so a
/// cancelled session can tell the client it was cut short.
pub struct MultiProducer {
    round: u32,
    rounds: u32,
    interval: Duration,
    rng: StdRng,
    pending: VecDeque<StreamEvent>,
    connected_sent: bool,
}

impl MultiProducer {
    /// Create a producer running the given number of mixed-event rounds.
    #[must_use]
    pub fn new(rounds: u32, interval: Duration, rng: StdRng) -> Self {
        Self {
            round: 0,
            rounds,
            interval,
            rng,
            pending: VecDeque::new(),
            connected_sent: false,
        }
    }
}

#[async_trait]
impl EventProducer for MultiProducer {
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ProducerError> {
        // Queued extras (the warning) go out before the next round starts.
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }

        if !self.connected_sent {
            self.connected_sent = true;
            let payload = json!({ "connected": true, "timestamp": Utc::now().to_rfc3339() });
            return Ok(Some(StreamEvent::json(payload).with_kind("connected")));
        }

        if self.round >= self.rounds {
            return Ok(None);
        }
        sleep(self.interval).await;
        let i = self.round;
        self.round += 1;

        let event = if i % 5 == 0 {
            StreamEvent::json(json!({ "status": "healthy", "uptime": i })).with_kind("status")
        } else if i % 3 == 0 {
            StreamEvent::json(json!({
                "cpu": self.rng.gen_range(0.0..100.0),
                "memory": self.rng.gen_range(0.0..100.0),
                "requests": self.rng.gen_range(0..1000),
            }))
            .with_kind("metrics")
        } else {
            StreamEvent::json(json!({ "count": i, "message": format!("Update {i}") }))
                .with_kind("update")
        };

        if i == WARNING_ROUND {
            self.pending.push_back(
                StreamEvent::json(json!({ "message": "Warning: High memory usage detected" }))
                    .with_kind("warning"),
            );
        }
        Ok(Some(event))
    }

    fn final_event(&mut self) -> Option<StreamEvent> {
        Some(StreamEvent::json(json!({ "message": "Stream completed" })).with_kind("complete"))
    }

    fn interrupt_event(&mut self) -> Option<StreamEvent> {
        Some(StreamEvent::json(json!({ "message": "Stream interrupted" })).with_kind("error"))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    async fn kinds(mut producer: MultiProducer) -> Vec<String> {
        let mut kinds = Vec::new();
        while let Some(event) = producer.next_event().await.unwrap() {
            kinds.push(event.kind.unwrap_or_default());
        }
        kinds
    }

    #[tokio::test]
    async fn interleaves_kinds_and_queues_warning_after_round_ten() {
        let producer = MultiProducer::new(12, Duration::ZERO, StdRng::seed_from_u64(7));
        let kinds = kinds(producer).await;
        assert_eq!(
            kinds,
            vec![
                "connected", "status", "update", "update", "metrics", "update", "status",
                "metrics", "update", "update", "metrics", "status", "warning", "update",
            ]
        );
    }

    #[tokio::test]
    async fn seeded_runs_replay_identical_metrics() {
        let mut a = MultiProducer::new(4, Duration::ZERO, StdRng::seed_from_u64(42));
        let mut b = MultiProducer::new(4, Duration::ZERO, StdRng::seed_from_u64(42));
        for _ in 0..5 {
            let ea = a.next_event().await.unwrap().unwrap();
            let eb = b.next_event().await.unwrap().unwrap();
            // The connected preamble carries a wall-clock timestamp; every
            // other event must replay byte-identically under the same seed.
            if ea.kind.as_deref() != Some("connected") {
                assert_eq!(ea, eb);
            }
        }
    }
}

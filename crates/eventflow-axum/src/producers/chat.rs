//! Simulated chat-response producer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::time::sleep;

use eventflow_core::{EventProducer, ProducerError, StreamEvent};

/// Streams a canned response word by word, then a `done` summary with the
/// full content and token count.
pub struct ChatProducer {
    response: String,
    words: Vec<String>,
    index: usize,
    interval: Duration,
}

impl ChatProducer {
    /// Seed message used when the client does not supply one.
    pub const DEFAULT_MESSAGE: &'static str = "Hello, how are you?";

    /// Create a chat producer answering `message`.
    #[must_use]
    pub fn new(message: &str, interval: Duration) -> Self {
        let response = format!("Thanks for asking '{message}'! Here's my response in chunks...");
        let words = response.split_whitespace().map(str::to_string).collect();
        Self {
            response,
            words,
            index: 0,
            interval,
        }
    }
}

#[async_trait]
impl EventProducer for ChatProducer {
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ProducerError> {
        if self.index >= self.words.len() {
            return Ok(None);
        }
        if self.index > 0 {
            sleep(self.interval).await;
        }

        let payload = json!({
            "chunk": format!("{} ", self.words[self.index]),
            "index": self.index,
            "is_final": self.index == self.words.len() - 1,
        });
        self.index += 1;
        Ok(Some(StreamEvent::json(payload).with_kind("chunk")))
    }

    fn final_event(&mut self) -> Option<StreamEvent> {
        Some(
            StreamEvent::json(json!({
                "content": self.response.clone(),
                "tokens": self.words.len(),
                "completed_at": Utc::now().to_rfc3339(),
            }))
            .with_kind("done"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn marks_the_last_chunk_final() {
        let mut producer = ChatProducer::new("hi", Duration::ZERO);
        let mut chunks = Vec::new();
        while let Some(event) = producer.next_event().await.unwrap() {
            chunks.push(event);
        }
        assert!(!chunks.is_empty());
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.payload["is_final"], false);
        }
        assert_eq!(chunks.last().unwrap().payload["is_final"], true);

        let done = producer.final_event().unwrap();
        assert_eq!(done.payload["tokens"], chunks.len());
        assert!(
            done.payload["content"]
                .as_str()
                .unwrap()
                .contains("'hi'")
        );
    }
}

//! Streaming endpoint handlers.
//!
//! Each handler binds a demo producer to a fresh session and hands back
//! the streaming response. Producer randomness comes from the configured
//! seed, never from ambient global state.

use axum::extract::{Query, State};
use axum::response::Response;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use eventflow_core::{HeartbeatPolicy, SessionConfig};

use crate::error::HttpError;
use crate::producers::{
    ChatProducer, CounterProducer, LogProducer, MultiProducer, ProgressProducer,
};
use crate::sse::stream_response;
use crate::state::AppState;

/// Upper bound on the chat seed message, enforced before streaming starts.
const MAX_CHAT_MESSAGE_LEN: usize = 2000;

fn rng_for(state: &AppState) -> StdRng {
    state
        .rng_seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// `GET /stream/basic`: counter ticks with a `done` terminal event.
pub async fn basic(State(state): State<AppState>) -> Result<Response, HttpError> {
    let settings = &state.settings;
    let producer = CounterProducer::new(settings.counter_limit, settings.counter_interval);
    let config = SessionConfig::with_heartbeat(
        HeartbeatPolicy::new(settings.heartbeat_every).with_text("heartbeat"),
    );
    stream_response(producer, config, state.cancel.child_token())
}

/// `GET /stream/logs`: canned log entries, then an EOF marker.
pub async fn logs(State(state): State<AppState>) -> Result<Response, HttpError> {
    let producer = LogProducer::new(state.settings.log_interval, rng_for(&state));
    stream_response(
        producer,
        SessionConfig::without_heartbeat(),
        state.cancel.child_token(),
    )
}

/// `GET /stream/progress`: fixed progress steps with percentages.
pub async fn progress(State(state): State<AppState>) -> Result<Response, HttpError> {
    let producer = ProgressProducer::new(state.settings.progress_interval);
    stream_response(
        producer,
        SessionConfig::without_heartbeat(),
        state.cancel.child_token(),
    )
}

/// `GET /stream/multi`: mixed event kinds with keep-alives and a
/// best-effort interrupt marker on shutdown.
pub async fn multi(State(state): State<AppState>) -> Result<Response, HttpError> {
    let settings = &state.settings;
    let producer =
        MultiProducer::new(settings.multi_rounds, settings.multi_interval, rng_for(&state));
    let config =
        SessionConfig::with_heartbeat(HeartbeatPolicy::new(settings.multi_heartbeat_every));
    stream_response(producer, config, state.cancel.child_token())
}

/// Query parameters for `/stream/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    /// Seed message echoed back in the simulated response.
    message: Option<String>,
}

/// `GET /stream/chat`: word-chunked simulated chat response.
pub async fn chat(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> Result<Response, HttpError> {
    let message = query
        .message
        .unwrap_or_else(|| ChatProducer::DEFAULT_MESSAGE.to_string());
    if message.chars().count() > MAX_CHAT_MESSAGE_LEN {
        return Err(HttpError::BadRequest(format!(
            "message exceeds {MAX_CHAT_MESSAGE_LEN} characters"
        )));
    }

    let producer = ChatProducer::new(&message, state.settings.chat_interval);
    stream_response(
        producer,
        SessionConfig::without_heartbeat(),
        state.cancel.child_token(),
    )
}

//! Demo event producers for the streaming endpoints.
//!
//! Each producer implements [`eventflow_core::EventProducer`] and paces
//! itself by sleeping inside `next_event`. They hold no shared state, so a
//! session can abandon any of them mid-sequence without cleanup.

mod chat;
mod counter;
mod logs;
mod multi;
mod progress;

pub use chat::ChatProducer;
pub use counter::CounterProducer;
pub use logs::LogProducer;
pub use multi::MultiProducer;
pub use progress::ProgressProducer;

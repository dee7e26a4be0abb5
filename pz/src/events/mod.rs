//! Pipeline event stream
//!
//! The coordinator and every stage component emit a [`PipelineEvent`] for each
//! observable step. The CLI prints them as narration; tests subscribe to check
//! ordering.

mod bus;
mod types;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus};
pub use types::PipelineEvent;

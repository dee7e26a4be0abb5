//! Coordinator configuration

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::DEFAULT_CHANNEL_CAPACITY;

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Channel buffer size for coordinator requests
    #[serde(rename = "channel-buffer", default = "default_channel_buffer")]
    pub channel_buffer: usize,

    /// Capacity of the pipeline event broadcast channel
    #[serde(rename = "event-bus-capacity", default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

fn default_channel_buffer() -> usize {
    debug!("default_channel_buffer: called");
    1000
}

fn default_event_bus_capacity() -> usize {
    debug!("default_event_bus_capacity: called");
    DEFAULT_CHANNEL_CAPACITY
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        debug!("CoordinatorConfig::default: called");
        Self {
            channel_buffer: default_channel_buffer(),
            event_bus_capacity: default_event_bus_capacity(),
        }
    }
}

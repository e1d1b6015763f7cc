// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::errors::PortError;

/// Topic-based publish/subscribe.
#[async_trait]
pub trait BusPort: Send + Sync {
    /// Returns the number of subscribers that received the message.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<usize, PortError>;

    /// Only messages published after the call are delivered. `topic` may
    /// contain `*` segments matching any one dot-separated segment. A
    /// receiver that falls behind the adapter's capacity observes `Lagged`.
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<Vec<u8>>, PortError>;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::errors::PortError;
use crate::traits::BusPort;

pub struct BusService {
    adapter: Arc<dyn BusPort>,
}

impl BusService {
    pub fn new(adapter: Arc<dyn BusPort>) -> Self {
        Self { adapter }
    }

    /// Returns how many subscribers received the message.
    pub async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<usize, PortError> {
        self.adapter.publish(topic, payload).await
    }

    pub async fn publish_json<T: serde::Serialize + ?Sized>(
        &self,
        topic: &str,
        message: &T,
    ) -> Result<usize, PortError> {
        self.publish(topic, serde_json::to_vec(message)?).await
    }

    pub async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<Vec<u8>>, PortError> {
        self.adapter.subscribe(topic).await
    }
}

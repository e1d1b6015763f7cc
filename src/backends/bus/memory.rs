// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};

use super::topic_matches;
use crate::errors::PortError;
use crate::traits::BusPort;

/// In-process bus, one broadcast channel per subscribed topic pattern.
pub struct MemoryBusAdapter {
    capacity: usize,
    topics: RwLock<HashMap<String, broadcast::Sender<Vec<u8>>>>,
}

impl MemoryBusAdapter {
    pub fn new(capacity: usize) -> Result<Self, PortError> {
        if capacity == 0 {
            return Err(PortError::Invalid("bus capacity must be positive".to_string()));
        }
        Ok(Self {
            capacity,
            topics: RwLock::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl BusPort for MemoryBusAdapter {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<usize, PortError> {
        let topics = self.topics.read().await;
        let delivered = topics
            .iter()
            .filter(|(pattern, _)| topic_matches(pattern, topic))
            // send fails only when nobody is subscribed
            .map(|(_, sender)| sender.send(payload.clone()).unwrap_or(0))
            .sum();
        Ok(delivered)
    }

    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<Vec<u8>>, PortError> {
        let mut topics = self.topics.write().await;
        let sender = topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        Ok(sender.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_topic_subscribers_only() {
        let bus = MemoryBusAdapter::new(16).unwrap();
        let mut events = bus.subscribe("events").await.unwrap();
        let mut other = bus.subscribe("other").await.unwrap();

        assert_eq!(bus.publish("events", b"hello".to_vec()).await.unwrap(), 1);

        assert_eq!(events.recv().await.unwrap(), b"hello".to_vec());
        assert!(matches!(
            other.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_wildcard_subscription_receives_matching_topics() {
        let bus = MemoryBusAdapter::new(16).unwrap();
        let mut any_event = bus.subscribe("ts.*.s.alice").await.unwrap();
        let mut exact = bus.subscribe("ts.insert.s.alice").await.unwrap();

        assert_eq!(bus.publish("ts.insert.s.alice", b"1".to_vec()).await.unwrap(), 2);
        assert_eq!(bus.publish("ts.delete.s.alice", b"2".to_vec()).await.unwrap(), 1);
        assert_eq!(bus.publish("ts.delete.s.bob", b"3".to_vec()).await.unwrap(), 0);

        assert_eq!(any_event.recv().await.unwrap(), b"1".to_vec());
        assert_eq!(any_event.recv().await.unwrap(), b"2".to_vec());
        assert_eq!(exact.recv().await.unwrap(), b"1".to_vec());
        assert!(exact.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let bus = MemoryBusAdapter::new(4).unwrap();
        assert_eq!(bus.publish("nobody", vec![1]).await.unwrap(), 0);
        assert!(MemoryBusAdapter::new(0).is_err());
    }
}

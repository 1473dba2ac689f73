//! Notification sink
//!
//! Ordered, bounded list of user-facing messages. Any component may post;
//! the view renders the list and dismisses entries by id. When full, the
//! oldest entry is dropped.

use crate::domain::entities::notification::{Notification, Severity};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationSink {
    entries: Arc<RwLock<VecDeque<Notification>>>,
    capacity: usize,
}

impl NotificationSink {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a notification and return its id
    pub async fn post(&self, notification: Notification) -> Uuid {
        match notification.severity {
            Severity::Error => log::error!(
                "{} {}",
                notification.message,
                notification.description.as_deref().unwrap_or_default()
            ),
            Severity::Success | Severity::Info => log::info!(
                "{} {}",
                notification.message,
                notification.txid.as_deref().unwrap_or_default()
            ),
        }

        let id = notification.id;
        let mut entries = self.entries.write().await;
        while entries.len() >= self.capacity {
            if let Some(dropped) = entries.pop_front() {
                log::debug!("Notification list full, dropping {}", dropped.id);
            }
        }
        entries.push_back(notification);
        id
    }

    /// Remove one notification; false if it was already gone
    pub async fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = self.entries.write().await;
        match entries.iter().position(|n| n.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot in posting order, oldest first
    pub async fn list(&self) -> Vec<Notification> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_post_keeps_order() {
        let sink = NotificationSink::new(10);
        sink.post(Notification::info("first")).await;
        sink.post(Notification::success("second")).await;
        sink.post(Notification::error("third")).await;

        let messages: Vec<_> = sink.list().await.into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_no_deduplication() {
        let sink = NotificationSink::new(10);
        sink.post(Notification::error("Transaction failed!")).await;
        sink.post(Notification::error("Transaction failed!")).await;
        assert_eq!(sink.len().await, 2);
    }

    #[tokio::test]
    async fn test_capacity_drops_oldest() {
        let sink = NotificationSink::new(3);
        for i in 0..5 {
            sink.post(Notification::info(format!("n{}", i))).await;
            assert!(sink.len().await <= 3);
        }

        let messages: Vec<_> = sink.list().await.into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4"]);
    }

    #[tokio::test]
    async fn test_zero_capacity_still_holds_latest() {
        let sink = NotificationSink::new(0);
        assert_eq!(sink.capacity(), 1);
        sink.post(Notification::info("a")).await;
        sink.post(Notification::info("b")).await;
        assert_eq!(sink.list().await[0].message, "b");
    }

    #[tokio::test]
    async fn test_dismiss_and_clear() {
        let sink = NotificationSink::new(10);
        let keep = sink.post(Notification::info("keep")).await;
        let drop = sink.post(Notification::info("drop")).await;

        assert!(sink.dismiss(drop).await);
        assert!(!sink.dismiss(drop).await);
        let remaining = sink.list().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep);

        sink.clear().await;
        assert!(sink.is_empty().await);
    }
}

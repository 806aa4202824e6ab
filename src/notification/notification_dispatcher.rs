use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    notification_models::NotificationDocument,
    notification_service::{compose, partition},
};
use crate::{
    assignment::{Assignment, SnapshotStore},
    error::{AppError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub channel: String,
    pub message_ts: String,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Something that can put a notification in front of a human.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn send(
        &self,
        document: &NotificationDocument,
        channel: &str,
    ) -> std::result::Result<DeliveryReceipt, DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(DeliveryReceipt),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// Every assignment of the snapshot in due-date order.
    pub assignments: Vec<Assignment>,
    pub document: NotificationDocument,
    pub delivery: DeliveryOutcome,
}

/// Turns the latest snapshot into a reminder and hands it to the delivery client.
#[derive(Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn SnapshotStore>,
    delivery: Arc<dyn DeliveryClient>,
    recipient: String,
    channel: String,
}

impl NotificationDispatcher {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        delivery: Arc<dyn DeliveryClient>,
        recipient: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            store,
            delivery,
            recipient: recipient.into(),
            channel: channel.into(),
        }
    }

    pub async fn dispatch(&self) -> Result<DispatchResult> {
        self.dispatch_at(Utc::now()).await
    }

    /// Runs one dispatch with `now` used for both partitioning and labelling.
    pub async fn dispatch_at(&self, now: DateTime<Utc>) -> Result<DispatchResult> {
        let snapshot = self.store.latest().await?.ok_or_else(AppError::no_data)?;

        debug!(
            snapshot_id = snapshot.id,
            ingested_at = %snapshot.ingested_at,
            "Dispatching reminder from snapshot"
        );

        let partitioned = partition(snapshot.assignments, now);
        let document = compose(&self.recipient, &partitioned.overdue, &partitioned.upcoming, now);
        debug!(assignments = document.assignment_count(), "Composed reminder");

        let delivery = match self.delivery.send(&document, &self.channel).await {
            Ok(receipt) => {
                info!(
                    channel = %receipt.channel,
                    ts = %receipt.message_ts,
                    overdue = document.overdue_count(),
                    upcoming = document.upcoming_count(),
                    "Message sent"
                );
                DeliveryOutcome::Delivered(receipt)
            }
            Err(e) => {
                warn!(channel = %self.channel, error = %e, "Notification delivery failed");
                DeliveryOutcome::Failed(e.to_string())
            }
        };

        Ok(DispatchResult {
            assignments: partitioned.into_sorted(),
            document,
            delivery,
        })
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every send; optionally fails them all.
    #[derive(Default)]
    pub struct RecordingDelivery {
        pub sent: Mutex<Vec<(NotificationDocument, String)>>,
        pub fail: bool,
    }

    impl RecordingDelivery {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DeliveryClient for RecordingDelivery {
        async fn send(
            &self,
            document: &NotificationDocument,
            channel: &str,
        ) -> std::result::Result<DeliveryReceipt, DeliveryError> {
            self.sent
                .lock()
                .unwrap()
                .push((document.clone(), channel.to_string()));

            if self.fail {
                return Err(DeliveryError::Rejected("channel_not_found".into()));
            }
            Ok(DeliveryReceipt {
                channel: channel.to_string(),
                message_ts: "1700000000.000100".into(),
            })
        }
    }
}

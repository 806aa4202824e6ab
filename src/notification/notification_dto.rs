use serde::Serialize;
use utoipa::ToSchema;

use super::{
    notification_dispatcher::{DeliveryOutcome, DispatchResult},
    notification_models::NotificationDocument,
};
use crate::assignment::Assignment;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub assignments: Vec<Assignment>,
    pub overdue: usize,
    pub upcoming: usize,
    pub delivered: bool,
    pub message_ts: Option<String>,
    pub delivery_error: Option<String>,
    pub document: NotificationDocument,
}

impl From<DispatchResult> for DispatchResponse {
    fn from(result: DispatchResult) -> Self {
        let (delivered, message_ts, delivery_error) = match result.delivery {
            DeliveryOutcome::Delivered(receipt) => (true, Some(receipt.message_ts), None),
            DeliveryOutcome::Failed(reason) => (false, None, Some(reason)),
        };

        Self {
            assignments: result.assignments,
            overdue: result.document.overdue_count(),
            upcoming: result.document.upcoming_count(),
            delivered,
            message_ts,
            delivery_error,
            document: result.document,
        }
    }
}

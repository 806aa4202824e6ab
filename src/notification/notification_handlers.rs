use axum::{extract::State, Json};

use super::notification_dto::DispatchResponse;
use crate::{error::Result, state::AppState};

/// Compose a reminder from the latest snapshot and post it to the channel
///
/// A failed delivery still answers 200; the response carries `delivered: false`
/// and the reason.
#[utoipa::path(
    post,
    path = "/send-notification",
    responses(
        (status = 200, description = "Reminder composed", body = DispatchResponse),
        (status = 404, description = "No assignments found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn send_notification(State(state): State<AppState>) -> Result<Json<DispatchResponse>> {
    let result = state.dispatcher.dispatch().await?;

    Ok(Json(result.into()))
}

use axum::{extract::State, Json};
use tracing::info;

use super::{
    assignment_dto::{validate_payloads, AssignmentPayload, IngestResponse},
    assignment_models::Snapshot,
};
use crate::{
    error::{AppError, Result},
    extract::AppJson,
    state::AppState,
};

/// Store a new assignment snapshot
#[utoipa::path(
    post,
    path = "/data",
    request_body = Vec<AssignmentPayload>,
    responses(
        (status = 200, description = "Snapshot stored", body = IngestResponse),
        (status = 400, description = "Malformed assignment"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "assignments",
    security(("bearer_auth" = []))
)]
pub async fn ingest_assignments(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<AssignmentPayload>>,
) -> Result<Json<IngestResponse>> {
    let assignments = validate_payloads(payload)?;

    let snapshot = state.snapshot_store.insert(&assignments).await?;

    info!(
        snapshot_id = snapshot.id,
        assignments = snapshot.assignments.len(),
        "Stored assignment snapshot"
    );

    Ok(Json(IngestResponse {
        received: snapshot.assignments,
    }))
}

/// Get the most recent assignment snapshot
#[utoipa::path(
    get,
    path = "/data",
    responses(
        (status = 200, description = "Latest snapshot", body = Snapshot),
        (status = 404, description = "No assignments found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "assignments",
    security(("bearer_auth" = []))
)]
pub async fn get_latest_snapshot(State(state): State<AppState>) -> Result<Json<Snapshot>> {
    let snapshot = state
        .snapshot_store
        .latest()
        .await?
        .ok_or_else(AppError::no_data)?;

    Ok(Json(snapshot))
}

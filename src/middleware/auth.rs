use crate::{error::AppError, state::AppState};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

/// Requires `Authorization: Bearer <API_KEY>`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h))
        .ok_or(AppError::Unauthorized("Unauthorized".to_string()))?;

    if api_key != state.config.api_key {
        tracing::debug!(path = %req.uri().path(), "Rejected request with bad API key");
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(next.run(req).await)
}

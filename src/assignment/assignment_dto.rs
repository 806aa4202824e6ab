use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::assignment_models::{parse_due_date, Assignment};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPayload {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub course_name: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[validate(custom(function = "validate_due_date"))]
    pub due_date: String,
    #[validate(url)]
    pub alternate_link: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub received: Vec<Assignment>,
}

fn validate_due_date(value: &str) -> std::result::Result<(), ValidationError> {
    match parse_due_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("due_date")),
    }
}

impl TryFrom<AssignmentPayload> for Assignment {
    type Error = AppError;

    fn try_from(payload: AssignmentPayload) -> Result<Self> {
        payload.validate()?;

        let due_date = parse_due_date(&payload.due_date)
            .ok_or_else(|| AppError::Validation(format!("invalid dueDate {:?}", payload.due_date)))?;

        Ok(Assignment {
            id: payload.id,
            course_name: payload.course_name,
            title: payload.title,
            description: payload.description,
            due_date,
            alternate_link: payload.alternate_link,
        })
    }
}

/// Validates an inbound batch. A single bad element rejects the whole batch,
/// and ids must be unique within it.
pub fn validate_payloads(payloads: Vec<AssignmentPayload>) -> Result<Vec<Assignment>> {
    let mut seen = HashSet::with_capacity(payloads.len());

    payloads
        .into_iter()
        .enumerate()
        .map(|(index, payload)| {
            if !seen.insert(payload.id.clone()) {
                return Err(AppError::Validation(format!(
                    "assignment[{}]: duplicate id {:?}",
                    index, payload.id
                )));
            }
            Assignment::try_from(payload).map_err(|e| match e {
                AppError::Validation(msg) => {
                    AppError::Validation(format!("assignment[{}]: {}", index, msg))
                }
                other => other,
            })
        })
        .collect()
}

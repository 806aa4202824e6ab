use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, Result};

/// A single piece of coursework as reported by the classroom feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub course_name: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub alternate_link: String,
}

/// An immutable capture of the full assignment list at ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: i64,
    pub ingested_at: DateTime<Utc>,
    pub assignments: Vec<Assignment>,
}

/// Raw row of the `data` table.
#[derive(Debug, FromRow)]
pub struct SnapshotRow {
    pub id: i64,
    pub timestamp: i64,
    pub data: String,
}

impl TryFrom<SnapshotRow> for Snapshot {
    type Error = AppError;

    fn try_from(row: SnapshotRow) -> Result<Self> {
        let ingested_at = Utc
            .timestamp_millis_opt(row.timestamp)
            .single()
            .ok_or_else(|| {
                tracing::error!(snapshot_id = row.id, timestamp = row.timestamp, "Snapshot timestamp out of range");
                AppError::InternalError
            })?;

        Ok(Snapshot {
            id: row.id,
            ingested_at,
            assignments: serde_json::from_str(&row.data)?,
        })
    }
}

/// Parses a due date given either as an RFC 3339 timestamp or as a plain
/// calendar date. Dates without a time are taken as midnight UTC.
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let parsed = parse_due_date("2024-03-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_due_date("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime() {
        let parsed = parse_due_date("2024-03-01T23:59:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_due_date("next tuesday").is_none());
        assert!(parse_due_date("2024-13-40").is_none());
        assert!(parse_due_date("").is_none());
    }

    #[test]
    fn test_assignment_wire_format_is_camel_case() {
        let assignment = Assignment {
            id: "a".into(),
            course_name: "Physics".into(),
            title: "Lab 1".into(),
            description: "Pendulum".into(),
            due_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            alternate_link: "https://classroom.google.com/c/1/a/1".into(),
        };

        let value = serde_json::to_value(&assignment).unwrap();
        assert_eq!(value["courseName"], "Physics");
        assert_eq!(value["alternateLink"], "https://classroom.google.com/c/1/a/1");
        assert_eq!(value["dueDate"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_row_decodes_into_snapshot() {
        let row = SnapshotRow {
            id: 7,
            timestamp: 1_700_000_000_000,
            data: "[]".into(),
        };

        let snapshot = Snapshot::try_from(row).unwrap();
        assert_eq!(snapshot.id, 7);
        assert_eq!(snapshot.ingested_at.timestamp_millis(), 1_700_000_000_000);
        assert!(snapshot.assignments.is_empty());
    }

    #[test]
    fn test_row_with_bad_json_is_rejected() {
        let row = SnapshotRow {
            id: 1,
            timestamp: 0,
            data: "{not json".into(),
        };

        assert!(matches!(
            Snapshot::try_from(row),
            Err(AppError::CorruptSnapshot(_))
        ));
    }
}

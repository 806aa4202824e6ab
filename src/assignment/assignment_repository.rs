use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::assignment_models::{Assignment, Snapshot, SnapshotRow};
use crate::{db::DbPool, error::Result};

/// Append-only history of assignment snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Appends a snapshot stamped with the current time. Earlier snapshots are never touched.
    async fn insert(&self, assignments: &[Assignment]) -> Result<Snapshot>;

    /// The snapshot with the greatest ingestion time, if any.
    async fn latest(&self) -> Result<Option<Snapshot>>;
}

#[derive(Clone)]
pub struct SnapshotRepository {
    pool: DbPool,
}

impl SnapshotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts with `now` as the candidate timestamp. The stored timestamp is
    /// bumped past the current maximum so ingestion times stay strictly increasing
    /// even when the clock stalls or steps backwards.
    pub async fn insert_at(
        &self,
        assignments: &[Assignment],
        now: DateTime<Utc>,
    ) -> Result<Snapshot> {
        let data = serde_json::to_string(assignments)?;

        let row = sqlx::query_as::<_, SnapshotRow>(
            "INSERT INTO data (timestamp, data)
             SELECT MAX(?1, COALESCE(MAX(timestamp) + 1, ?1)), ?2 FROM data
             RETURNING id, timestamp, data",
        )
        .bind(now.timestamp_millis())
        .bind(data)
        .fetch_one(&self.pool)
        .await?;

        Snapshot::try_from(row)
    }
}

#[async_trait]
impl SnapshotStore for SnapshotRepository {
    async fn insert(&self, assignments: &[Assignment]) -> Result<Snapshot> {
        self.insert_at(assignments, Utc::now()).await
    }

    async fn latest(&self) -> Result<Option<Snapshot>> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            "SELECT id, timestamp, data FROM data ORDER BY timestamp DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(Snapshot::try_from).transpose()
    }
}

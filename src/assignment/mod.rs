pub mod assignment_models;
pub mod assignment_dto;
pub mod assignment_repository;
pub mod assignment_handlers;

pub use assignment_models::{Assignment, Snapshot};
pub use assignment_dto::{AssignmentPayload, IngestResponse};
pub use assignment_repository::{SnapshotRepository, SnapshotStore};
pub use assignment_handlers::{get_latest_snapshot, ingest_assignments};

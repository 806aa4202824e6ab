use chrono::{DateTime, Utc};

use super::{
    notification_models::{
        AssignmentLine, AssignmentSection, Greeting, NotificationDocument, SectionKind,
    },
    relative_time::RelativeTime,
};
use crate::assignment::Assignment;

/// Assignments split around a reference time, each half ascending by due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionResult {
    pub overdue: Vec<Assignment>,
    pub upcoming: Vec<Assignment>,
}

impl PartitionResult {
    /// Both halves back in one due-date ordered list.
    pub fn into_sorted(self) -> Vec<Assignment> {
        let mut all = self.overdue;
        all.extend(self.upcoming);
        all
    }
}

/// Sorts by due date (stable, ties keep input order) and splits on `due_date < now`.
pub fn partition(mut assignments: Vec<Assignment>, now: DateTime<Utc>) -> PartitionResult {
    assignments.sort_by_key(|assignment| assignment.due_date);

    // Sorted input means the overdue ones form a prefix.
    let split = assignments.partition_point(|assignment| assignment.due_date < now);
    let upcoming = assignments.split_off(split);

    PartitionResult {
        overdue: assignments,
        upcoming,
    }
}

pub fn compose(
    recipient: &str,
    overdue: &[Assignment],
    upcoming: &[Assignment],
    now: DateTime<Utc>,
) -> NotificationDocument {
    NotificationDocument {
        greeting: Greeting {
            recipient: recipient.to_string(),
        },
        overdue: section(SectionKind::Overdue, overdue, now),
        upcoming: section(SectionKind::Upcoming, upcoming, now),
    }
}

fn section(
    kind: SectionKind,
    assignments: &[Assignment],
    now: DateTime<Utc>,
) -> Option<AssignmentSection> {
    if assignments.is_empty() {
        return None;
    }

    let lines = assignments
        .iter()
        .map(|assignment| AssignmentLine {
            course_name: assignment.course_name.clone(),
            title: assignment.title.clone(),
            link: assignment.alternate_link.clone(),
            due: RelativeTime::between(assignment.due_date, now),
        })
        .collect();

    Some(AssignmentSection {
        kind,
        count: assignments.len(),
        lines,
    })
}

use serde::Serialize;
use utoipa::ToSchema;

use super::relative_time::RelativeTime;

/// Channel-agnostic description of a reminder message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NotificationDocument {
    pub greeting: Greeting,
    /// Present only when at least one assignment is overdue.
    pub overdue: Option<AssignmentSection>,
    /// Present only when at least one assignment is still upcoming.
    pub upcoming: Option<AssignmentSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Greeting {
    pub recipient: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Overdue,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssignmentSection {
    pub kind: SectionKind,
    pub count: usize,
    pub lines: Vec<AssignmentLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentLine {
    pub course_name: String,
    pub title: String,
    pub link: String,
    #[schema(value_type = String, example = "3 days ago")]
    pub due: RelativeTime,
}

impl NotificationDocument {
    /// Non-empty sections, overdue first.
    pub fn sections(&self) -> impl Iterator<Item = &AssignmentSection> {
        self.overdue.iter().chain(self.upcoming.iter())
    }

    pub fn overdue_count(&self) -> usize {
        self.overdue.as_ref().map_or(0, |section| section.count)
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.as_ref().map_or(0, |section| section.count)
    }

    pub fn assignment_count(&self) -> usize {
        self.overdue_count() + self.upcoming_count()
    }
}

impl AssignmentLine {
    pub fn due_label(&self) -> String {
        format!("due {}", self.due)
    }
}

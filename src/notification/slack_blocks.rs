//! Slack Block Kit rendering of a [`NotificationDocument`].

use serde_json::{json, Value};

use super::notification_models::{AssignmentSection, NotificationDocument, SectionKind};

/// Escapes the three characters Slack treats as control sequences in mrkdwn.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn mrkdwn_section(text: String) -> Value {
    json!({
        "type": "section",
        "text": { "type": "mrkdwn", "text": text },
    })
}

fn header(text: String) -> Value {
    json!({
        "type": "header",
        "text": { "type": "plain_text", "text": text, "emoji": true },
    })
}

fn bullet_list(section: &AssignmentSection) -> String {
    section
        .lines
        .iter()
        .map(|line| {
            let due = escape(&line.due_label());
            // Overdue deadlines are bolded.
            let due = match section.kind {
                SectionKind::Overdue => format!("*{}*", due),
                SectionKind::Upcoming => due,
            };
            format!(
                "• *{}*: <{}|{}> - {}",
                escape(&line.course_name),
                escape(&line.link),
                escape(&line.title),
                due
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_blocks(document: &NotificationDocument) -> Vec<Value> {
    let mut blocks = vec![mrkdwn_section(format!(
        ":hyper-dino-wave: hi <@{}>!\nhere are the assignments you have due:",
        escape(&document.greeting.recipient)
    ))];

    for section in document.sections() {
        let title = match section.kind {
            SectionKind::Overdue => ":tw_warning: overdue assignments",
            SectionKind::Upcoming => ":spiral_calendar_pad: upcoming assignments",
        };
        blocks.push(header(format!("{} ({})", title, section.count)));
        blocks.push(mrkdwn_section(bullet_list(section)));
        if section.kind == SectionKind::Overdue {
            blocks.push(json!({ "type": "divider" }));
        }
    }

    blocks
}

/// Plain-text summary used for push notifications and clients without blocks.
pub fn fallback_text(document: &NotificationDocument) -> String {
    format!(
        "You have {} overdue and {} upcoming assignments",
        document.overdue_count(),
        document.upcoming_count()
    )
}

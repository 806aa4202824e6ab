// Declare submodules
pub mod notification_models;
pub mod notification_dto;
pub mod notification_dispatcher;
pub mod notification_handlers;
pub mod notification_service;
pub mod relative_time;
pub mod slack_blocks;
pub mod slack_client;

// Re-export public items
pub use notification_models::{AssignmentLine, AssignmentSection, Greeting, NotificationDocument, SectionKind};
pub use notification_dto::DispatchResponse;
pub use notification_dispatcher::NotificationDispatcher;
pub use notification_handlers::send_notification;
pub use slack_client::SlackClient;

pub mod activity_log;
pub mod document;
pub mod project;
pub mod user;

pub use activity_log::{ActivityAction, ActivityLog, NewActivityLog};
pub use document::{Document, DocumentApprovalStatus, PendingDocument};
pub use project::{PendingProject, Project, ProjectStatus};
pub use user::User;

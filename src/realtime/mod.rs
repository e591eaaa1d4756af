//! Best-effort realtime notification fan-out.
//!
//! Events are a side channel for live UI refresh, not a source of truth:
//! delivery is at-most-once, failures are logged and dropped, and nothing
//! in the request path ever waits on a publish.

pub mod transport;

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::warn;

pub use transport::{HttpPushTransport, NoopTransport, NotificationTransport, TransportError};

/// Channel names subscribers can listen on.
pub mod channels {
    use uuid::Uuid;

    /// Barangay-wide events
    pub const GLOBAL: &str = "barangay-hub";
    /// Aggregate dashboard refreshes
    pub const DASHBOARD: &str = "dashboard";
    /// Notification center feed
    pub const NOTIFICATIONS: &str = "notifications";

    pub fn project(id: Uuid) -> String {
        format!("project-{}", id)
    }

    pub fn task(id: Uuid) -> String {
        format!("task-{}", id)
    }

    pub fn user_private(id: Uuid) -> String {
        format!("private-user-{}", id)
    }
}

/// Event names carried on the channels.
pub mod events {
    pub const PROJECT_UPDATED: &str = "project-updated";
    pub const TASK_UPDATED: &str = "task-updated";
    pub const TASK_ASSIGNED: &str = "task-assigned";
    pub const COMMENT_ADDED: &str = "comment-added";
    pub const TYPING_STARTED: &str = "typing-started";
    pub const TYPING_STOPPED: &str = "typing-stopped";
    pub const NOTIFICATION_SENT: &str = "notification-sent";
    pub const GOAL_UPDATED: &str = "goal-updated";
    pub const MILESTONE_COMPLETED: &str = "milestone-completed";
    pub const EVENT_UPDATED: &str = "event-updated";
    pub const DOCUMENT_UPLOADED: &str = "document-uploaded";
    pub const ANNOUNCEMENT_PUBLISHED: &str = "announcement-published";
}

/// Fire-and-forget event publisher.
///
/// Built once at startup around a transport and carried in the app state;
/// handlers and services call [`Broadcaster::publish`] after their writes
/// are durable. The publish runs on a detached task so a slow or failing
/// transport can never block or fail the caller.
#[derive(Clone)]
pub struct Broadcaster {
    transport: Arc<dyn NotificationTransport>,
}

impl Broadcaster {
    pub fn new(transport: Arc<dyn NotificationTransport>) -> Self {
        Self { transport }
    }

    /// Publish `event` with `payload` on `channel`. Errors are logged at
    /// warn level and dropped. The returned handle lets tests await the
    /// detached task; production callers drop it.
    pub fn publish(
        &self,
        channel: impl Into<String>,
        event: &'static str,
        payload: Value,
    ) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        let channel = channel.into();

        tokio::spawn(async move {
            if let Err(e) = transport.send(&channel, event, &payload).await {
                warn!("Realtime publish failed on {}: {}", channel, e);
            }
        })
    }
}

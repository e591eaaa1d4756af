use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Actions recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    ProjectCreated,
    ProjectUpdated,
    ProjectApproved,
    ProjectCancelled,
    DocumentUploaded,
    DocumentApproved,
}

/// Append-only audit record. Never updated or deleted; entity references
/// are plain ids so a log entry outlives the entity it describes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: Uuid,
    pub action: ActivityAction,
    pub description: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub actor_user_id: Uuid,
    pub project_id: Option<Uuid>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new audit record; the store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub action: ActivityAction,
    pub description: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub actor_user_id: Uuid,
    pub project_id: Option<Uuid>,
    pub metadata: serde_json::Value,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Explicit approval state for an uploaded document.
///
/// The column is nullable and NULL means the same thing as `Pending` to the
/// pending-documents query; only an explicit APPROVED/REJECTED value takes
/// a document out of the pending set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_approval_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Metadata for an uploaded file. `filepath` is relative to the storage
/// root; `download_count` only ever increases.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub filepath: String,
    pub mimetype: String,
    pub original_name: String,
    pub project_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
    pub download_count: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub approval_status: Option<DocumentApprovalStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// A document counts as pending unless it carries an explicit
    /// non-pending status.
    pub fn is_pending(&self) -> bool {
        matches!(
            self.approval_status,
            None | Some(DocumentApprovalStatus::Pending)
        )
    }
}

/// Pending-documents read view: document row joined with the uploader's
/// name and the parent project's name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PendingDocument {
    pub id: Uuid,
    pub filepath: String,
    pub mimetype: String,
    pub original_name: String,
    pub project_id: Option<Uuid>,
    pub project_name: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub uploaded_by_name: Option<String>,
    pub approval_status: Option<DocumentApprovalStatus>,
    pub created_at: DateTime<Utc>,
}

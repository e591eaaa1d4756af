use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{
    NewActivityLog, PendingDocument, PendingProject, Project, ProjectStatus, User,
};

/// Errors from the entity store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence boundary for the approval workflow and its read paths.
///
/// Handlers and services depend on this trait; the production
/// implementation is [`crate::database::PgEntityStore`]. Every call is a
/// potentially-blocking I/O operation that may fail independently.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Look up a user by external identity reference.
    async fn find_user_by_auth(&self, auth: &str) -> Result<Option<User>, StoreError>;

    /// Look up a project by id.
    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Apply an approval decision as a single unit: set the project status,
    /// bump its updated_at, and append the audit record. Either both writes
    /// become visible or neither does. Returns the updated project, or
    /// `NotFound` if the project vanished since it was read.
    async fn apply_decision(
        &self,
        project_id: Uuid,
        status: ProjectStatus,
        log: NewActivityLog,
    ) -> Result<Project, StoreError>;

    /// Projects awaiting a decision (PLANNING or PENDING_APPROVAL),
    /// newest first.
    async fn pending_projects(&self) -> Result<Vec<PendingProject>, StoreError>;

    /// Documents whose approval status is PENDING or unset, newest first.
    async fn pending_documents(&self) -> Result<Vec<PendingDocument>, StoreError>;
}

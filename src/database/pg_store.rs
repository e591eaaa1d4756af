use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{
    NewActivityLog, PendingDocument, PendingProject, Project, ProjectStatus, User,
};
use crate::database::manager::DatabaseManager;
use crate::database::store::{EntityStore, StoreError};

/// sqlx/Postgres implementation of the entity store.
pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn ping(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::QueryError(e.to_string()))
    }

    async fn find_user_by_auth(&self, auth: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE auth = $1")
            .bind(auth)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn apply_decision(
        &self,
        project_id: Uuid,
        status: ProjectStatus,
        log: NewActivityLog,
    ) -> Result<Project, StoreError> {
        // The status write and the audit insert must land together.
        let mut tx = self.pool.begin().await?;

        let project = sqlx::query_as::<_, Project>(
            "UPDATE projects SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(project_id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Project not found: {}", project_id)))?;

        sqlx::query(
            "INSERT INTO activity_logs \
                 (action, description, entity_type, entity_id, actor_user_id, project_id, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(log.action)
        .bind(&log.description)
        .bind(&log.entity_type)
        .bind(log.entity_id)
        .bind(log.actor_user_id)
        .bind(log.project_id)
        .bind(&log.metadata)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(project)
    }

    async fn pending_projects(&self) -> Result<Vec<PendingProject>, StoreError> {
        let rows = sqlx::query_as::<_, PendingProject>(
            "SELECT p.id, p.name, p.description, p.status, p.created_by, \
                    c.name AS created_by_name, c.email AS created_by_email, \
                    m.name AS manager_name, \
                    p.created_at, p.updated_at \
             FROM projects p \
             JOIN users c ON c.id = p.created_by \
             LEFT JOIN users m ON m.id = p.manager_id \
             WHERE p.status IN ('PLANNING', 'PENDING_APPROVAL') \
             ORDER BY p.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn pending_documents(&self) -> Result<Vec<PendingDocument>, StoreError> {
        let rows = sqlx::query_as::<_, PendingDocument>(
            "SELECT d.id, d.filepath, d.mimetype, d.original_name, \
                    d.project_id, p.name AS project_name, \
                    d.uploaded_by, u.name AS uploaded_by_name, \
                    d.approval_status, d.created_at \
             FROM documents d \
             LEFT JOIN projects p ON p.id = d.project_id \
             LEFT JOIN users u ON u.id = d.uploaded_by \
             WHERE d.approval_status IS NULL OR d.approval_status = 'PENDING' \
             ORDER BY d.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

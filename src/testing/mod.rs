//! In-process fakes and fixtures for the test suite.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{
    ActivityLog, Document, DocumentApprovalStatus, NewActivityLog, PendingDocument,
    PendingProject, Project, ProjectStatus, User,
};
use crate::database::store::{EntityStore, StoreError};
use crate::realtime::{Broadcaster, NotificationTransport, TransportError};
use crate::state::AppState;

/// App state wired to the given store and a recording transport.
pub fn test_state(store: std::sync::Arc<dyn EntityStore>) -> AppState {
    AppState::new(
        store,
        Broadcaster::new(std::sync::Arc::new(RecordingTransport::new())),
    )
}

/// `Authorization` header value carrying a valid token for `user`.
pub fn bearer_for(user: &User) -> String {
    let claims = crate::auth::Claims::new(
        user.id,
        user.auth.clone(),
        user.name.clone(),
        user.role.clone(),
    );
    format!("Bearer {}", crate::auth::generate_jwt(claims).unwrap())
}

pub fn fixture_user(auth: &str, name: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        auth: auth.to_string(),
        name: name.to_string(),
        email: format!(
            "{}@example.ph",
            name.to_lowercase().replace(' ', ".")
        ),
        role: "staff".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn fixture_project(name: &str, status: ProjectStatus, created_by: Uuid) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        status,
        created_by,
        manager_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn fixture_document(
    name: &str,
    status: Option<DocumentApprovalStatus>,
    project_id: Option<Uuid>,
    uploaded_by: Option<Uuid>,
) -> Document {
    let now = Utc::now();
    Document {
        id: Uuid::new_v4(),
        filepath: format!("uploads/{}", name),
        mimetype: "application/pdf".to_string(),
        original_name: name.to_string(),
        project_id,
        uploaded_by,
        download_count: 0,
        last_accessed: None,
        approval_status: status,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory entity store. Mirrors the filter and ordering semantics of
/// the Postgres implementation and counts every store call so tests can
/// assert that rejected requests never touched persistence.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    projects: Mutex<Vec<Project>>,
    documents: Mutex<Vec<Document>>,
    logs: Mutex<Vec<ActivityLog>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn add_project(&self, project: Project) {
        self.projects.lock().unwrap().push(project);
    }

    /// Insert a project whose created_at lies `minutes_ago` in the past,
    /// for ordering assertions.
    pub fn add_project_created_ago(&self, mut project: Project, minutes_ago: i64) {
        project.created_at = Utc::now() - Duration::minutes(minutes_ago);
        self.add_project(project);
    }

    pub fn add_document(&self, document: Document) {
        self.documents.lock().unwrap().push(document);
    }

    pub fn add_document_created_ago(&self, mut document: Document, minutes_ago: i64) {
        document.created_at = Utc::now() - Duration::minutes(minutes_ago);
        self.add_document(document);
    }

    pub fn logs(&self) -> Vec<ActivityLog> {
        self.logs.lock().unwrap().clone()
    }

    /// Number of store calls observed since construction.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn user_name(&self, id: Uuid) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_user_by_auth(&self, auth: &str) -> Result<Option<User>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.auth == auth)
            .cloned())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn apply_decision(
        &self,
        project_id: Uuid,
        status: ProjectStatus,
        log: NewActivityLog,
    ) -> Result<Project, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| StoreError::NotFound(format!("Project not found: {}", project_id)))?;

        project.status = status;
        project.updated_at = Utc::now();
        let updated = project.clone();
        drop(projects);

        self.logs.lock().unwrap().push(ActivityLog {
            id: Uuid::new_v4(),
            action: log.action,
            description: log.description,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            actor_user_id: log.actor_user_id,
            project_id: log.project_id,
            metadata: log.metadata,
            created_at: Utc::now(),
        });

        Ok(updated)
    }

    async fn pending_projects(&self) -> Result<Vec<PendingProject>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap().clone();
        let mut rows: Vec<PendingProject> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                matches!(
                    p.status,
                    ProjectStatus::Planning | ProjectStatus::PendingApproval
                )
            })
            .map(|p| {
                let creator = users.iter().find(|u| u.id == p.created_by);
                PendingProject {
                    id: p.id,
                    name: p.name.clone(),
                    description: p.description.clone(),
                    status: p.status,
                    created_by: p.created_by,
                    created_by_name: creator.map(|u| u.name.clone()).unwrap_or_default(),
                    created_by_email: creator.map(|u| u.email.clone()).unwrap_or_default(),
                    manager_name: p.manager_id.and_then(|id| self.user_name(id)),
                    created_at: p.created_at,
                    updated_at: p.updated_at,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn pending_documents(&self) -> Result<Vec<PendingDocument>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let projects = self.projects.lock().unwrap().clone();
        let mut rows: Vec<PendingDocument> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.is_pending())
            .map(|d| PendingDocument {
                id: d.id,
                filepath: d.filepath.clone(),
                mimetype: d.mimetype.clone(),
                original_name: d.original_name.clone(),
                project_id: d.project_id,
                project_name: d
                    .project_id
                    .and_then(|id| projects.iter().find(|p| p.id == id))
                    .map(|p| p.name.clone()),
                uploaded_by: d.uploaded_by,
                uploaded_by_name: d.uploaded_by.and_then(|id| self.user_name(id)),
                approval_status: d.approval_status,
                created_at: d.created_at,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

/// Store whose every operation fails, for exercising the 500 surface.
pub struct FailingStore;

#[async_trait]
impl EntityStore for FailingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::QueryError("connection refused".into()))
    }

    async fn find_user_by_auth(&self, _auth: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::QueryError("connection refused".into()))
    }

    async fn find_project(&self, _id: Uuid) -> Result<Option<Project>, StoreError> {
        Err(StoreError::QueryError("connection refused".into()))
    }

    async fn apply_decision(
        &self,
        _project_id: Uuid,
        _status: ProjectStatus,
        _log: NewActivityLog,
    ) -> Result<Project, StoreError> {
        Err(StoreError::QueryError("connection refused".into()))
    }

    async fn pending_projects(&self) -> Result<Vec<PendingProject>, StoreError> {
        Err(StoreError::QueryError("connection refused".into()))
    }

    async fn pending_documents(&self) -> Result<Vec<PendingDocument>, StoreError> {
        Err(StoreError::QueryError("connection refused".into()))
    }
}

/// Transport that records every published event.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, String, Value)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, String, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationTransport for RecordingTransport {
    async fn send(&self, channel: &str, event: &str, payload: &Value) -> Result<(), TransportError> {
        self.sent
            .lock()
            .unwrap()
            .push((channel.to_string(), event.to_string(), payload.clone()));
        Ok(())
    }
}

/// Transport that always fails, for exercising the log-and-drop path.
pub struct FailingTransport;

#[async_trait]
impl NotificationTransport for FailingTransport {
    async fn send(
        &self,
        _channel: &str,
        _event: &str,
        _payload: &Value,
    ) -> Result<(), TransportError> {
        Err(TransportError::BadStatus(502))
    }
}

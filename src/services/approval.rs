use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{ActivityAction, NewActivityLog, Project, ProjectStatus};
use crate::database::store::{EntityStore, StoreError};
use crate::realtime::{channels, events, Broadcaster};

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Actor details included when the caller asks for an expanded view.
#[derive(Debug, Clone, Serialize)]
pub struct ActorSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct DecidedProject {
    #[serde(flatten)]
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<ActorSummary>,
}

#[derive(Debug, Serialize)]
pub struct DecisionOutcome {
    pub message: String,
    pub project: DecidedProject,
}

/// Project approve/reject workflow.
///
/// Authorization is identity-existence only: any caller with a user record
/// may decide any project, with no role check. Transitions are likewise
/// permissive - the current status is not inspected, so deciding an
/// already-decided project rewrites the row and appends another audit
/// entry. Both are deliberate policies of the workflow, not gaps.
pub struct ApprovalService {
    store: Arc<dyn EntityStore>,
    broadcaster: Broadcaster,
}

impl ApprovalService {
    pub fn new(store: Arc<dyn EntityStore>, broadcaster: Broadcaster) -> Self {
        Self { store, broadcaster }
    }

    /// Apply an approve/reject decision to a project.
    ///
    /// Resolves the actor, loads the project, then applies the status
    /// write and the audit insert as one transactional unit. The realtime
    /// fan-out happens after the write is durable and can neither block
    /// nor fail the call.
    pub async fn decide(
        &self,
        project_id: Uuid,
        approver_auth: &str,
        approved: bool,
        expand: bool,
    ) -> Result<DecisionOutcome, ApprovalError> {
        let actor = self
            .store
            .find_user_by_auth(approver_auth)
            .await?
            .ok_or_else(|| ApprovalError::UserNotFound(approver_auth.to_string()))?;

        let project = self
            .store
            .find_project(project_id)
            .await?
            .ok_or(ApprovalError::ProjectNotFound(project_id))?;

        let (status, action, verb) = if approved {
            (ProjectStatus::Approved, ActivityAction::ProjectApproved, "approved")
        } else {
            (ProjectStatus::Cancelled, ActivityAction::ProjectCancelled, "rejected")
        };

        let decided_at = Utc::now();
        let log = NewActivityLog {
            action,
            description: format!("Project {} was {} by {}", project.name, verb, actor.name),
            entity_type: "project".to_string(),
            entity_id: project.id,
            actor_user_id: actor.id,
            project_id: Some(project.id),
            metadata: json!({
                "approved": approved,
                "approvedBy": actor.name,
                "approvedAt": decided_at,
            }),
        };

        let updated = self
            .store
            .apply_decision(project.id, status, log)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => ApprovalError::ProjectNotFound(project_id),
                other => ApprovalError::Store(other),
            })?;

        // Fan out only once the transactional write is durable. The handle
        // is dropped: the broadcast must never delay or fail the response.
        let payload = json!({
            "project_id": updated.id,
            "status": updated.status,
            "updated_at": updated.updated_at,
        });
        let _ = self.broadcaster.publish(
            channels::project(updated.id),
            events::PROJECT_UPDATED,
            payload.clone(),
        );
        let _ = self
            .broadcaster
            .publish(channels::DASHBOARD, events::PROJECT_UPDATED, payload);

        let message = format!("Project {} {} successfully", updated.name, verb);
        let approved_by = expand.then(|| ActorSummary {
            name: actor.name.clone(),
            email: actor.email.clone(),
        });

        Ok(DecisionOutcome {
            message,
            project: DecidedProject {
                project: updated,
                approved_by,
            },
        })
    }
}

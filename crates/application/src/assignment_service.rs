use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use keyward_core::{AppError, AppResult};
use keyward_domain::{Assignment, AssignmentKind};

use crate::assignment_ports::{AssignmentRepository, AssignmentRequest, AssignmentWrite};
use crate::directory_ports::DirectoryRepositories;

mod endpoints;
mod listing;


pub use listing::AssignmentHistoryQuery;

/// Application service that validates and mutates assignment edges.
#[derive(Clone)]
pub struct AssignmentService {
    repositories: DirectoryRepositories,
    assignments: Arc<dyn AssignmentRepository>,
}

impl AssignmentService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repositories: DirectoryRepositories,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            repositories,
            assignments,
        }
    }

    /// Creates or reactivates the edge described by `request`.
    ///
    /// Checks run in a fixed order: source exists and is active, target exists
    /// and is active, tenants match, then no active edge exists for the pair.
    /// A soft-removed edge is reactivated in place and keeps its identifier.
    /// The repository re-checks both endpoints in the same atomic step as the
    /// edge write, so an endpoint removed after the prechecks yields `NotFound`.
    pub async fn assign(&self, request: AssignmentRequest) -> AppResult<Assignment> {
        let kind = request.kind;
        let source = self
            .require_active_endpoint(kind.source(), request.source_id)
            .await?;
        let target = self
            .require_active_endpoint(kind.target(), request.target_id)
            .await?;

        if kind.requires_same_tenant() && source.tenant_id != target.tenant_id {
            return Err(AppError::TenantMismatch(format!(
                "{} '{}' and {} '{}' belong to different tenants",
                source.kind.as_str(),
                source.id,
                target.kind.as_str(),
                target.id
            )));
        }

        match self.assignments.write_assignment(request, Utc::now()).await {
            Ok(AssignmentWrite::Created(assignment) | AssignmentWrite::Reactivated(assignment)) => {
                Ok(assignment)
            }
            Ok(AssignmentWrite::AlreadyActive(_)) | Err(AppError::Conflict(_)) => Err(
                already_assigned(kind, request.source_id, request.target_id),
            ),
            Err(error) => Err(error),
        }
    }

    /// Soft removes the active edge between `source_id` and `target_id`.
    pub async fn remove(
        &self,
        kind: AssignmentKind,
        source_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<Assignment> {
        self.assignments
            .deactivate_assignment(kind, source_id, target_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no active {kind} assignment from '{source_id}' to '{target_id}'"
                ))
            })
    }
}

fn already_assigned(kind: AssignmentKind, source_id: Uuid, target_id: Uuid) -> AppError {
    AppError::AlreadyAssigned(format!(
        "{kind} assignment from '{source_id}' to '{target_id}' is already active"
    ))
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use keyward_core::{AppResult, UserId};
use keyward_domain::{Assignment, AssignmentKind};

/// Input payload for creating or reactivating an assignment edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentRequest {
    /// Relationship kind.
    pub kind: AssignmentKind,
    /// Source endpoint identifier.
    pub source_id: Uuid,
    /// Target endpoint identifier.
    pub target_id: Uuid,
    /// User performing the assignment, when known.
    pub assigned_by: Option<UserId>,
}

/// Edge selection for one assignment kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentQuery {
    /// Relationship kind.
    pub kind: AssignmentKind,
    /// Restricts results to these sources when present.
    pub source_ids: Option<Vec<Uuid>>,
    /// Restricts results to these targets when present.
    pub target_ids: Option<Vec<Uuid>>,
    /// Excludes soft-removed edges when set.
    pub active_only: bool,
}

impl AssignmentQuery {
    /// Active edges leaving any of the given sources.
    #[must_use]
    pub fn active_from(kind: AssignmentKind, source_ids: Vec<Uuid>) -> Self {
        Self {
            kind,
            source_ids: Some(source_ids),
            target_ids: None,
            active_only: true,
        }
    }

    /// Active edges reaching any of the given targets.
    #[must_use]
    pub fn active_to(kind: AssignmentKind, target_ids: Vec<Uuid>) -> Self {
        Self {
            kind,
            source_ids: None,
            target_ids: Some(target_ids),
            active_only: true,
        }
    }

    /// Returns whether an edge passes the filter.
    #[must_use]
    pub fn matches(&self, assignment: &Assignment) -> bool {
        assignment.kind == self.kind
            && (!self.active_only || assignment.is_active)
            && self
                .source_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&assignment.source_id))
            && self
                .target_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&assignment.target_id))
    }
}

/// Outcome of an atomic assignment write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentWrite {
    /// A new edge row was inserted.
    Created(Assignment),
    /// A soft-removed edge row was reactivated in place.
    Reactivated(Assignment),
    /// The pair already had an active edge; nothing changed.
    AlreadyActive(Assignment),
}

/// Repository port for assignment edges.
///
/// State changes are conditional so that concurrent writers on the same pair
/// observe a single winner.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Creates or reactivates the edge for a pair in one atomic step.
    ///
    /// Both endpoints are re-read inside the same boundary as the edge write.
    /// A missing or inactive endpoint, or one whose tenant is inactive, fails
    /// with `NotFound` and leaves the edge untouched.
    async fn write_assignment(
        &self,
        request: AssignmentRequest,
        assigned_at: DateTime<Utc>,
    ) -> AppResult<AssignmentWrite>;

    /// Deactivates the active edge for a pair.
    ///
    /// Returns `None` when no active edge exists.
    async fn deactivate_assignment(
        &self,
        kind: AssignmentKind,
        source_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<Option<Assignment>>;

    /// Lists edges matching the query, most recently assigned first.
    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Vec<Assignment>>;
}

use chrono::{DateTime, Utc};
use keyward_application::{AssignmentHistoryQuery, AssignmentRequest};
use keyward_core::UserId;
use keyward_domain::{Assignment, AssignmentKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Incoming payload for creating or reactivating an assignment edge.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub assigned_by: Option<Uuid>,
}

impl AssignRequest {
    pub fn into_request(self, kind: AssignmentKind) -> AssignmentRequest {
        AssignmentRequest {
            kind,
            source_id: self.source_id,
            target_id: self.target_id,
            assigned_by: self.assigned_by.map(UserId::from_uuid),
        }
    }
}

/// Query string accepted by the edge history listing.
#[derive(Debug, Default, Deserialize)]
pub struct AssignmentHistoryParams {
    pub source_id: Option<Uuid>,
    pub target_id: Option<Uuid>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl AssignmentHistoryParams {
    pub fn into_query(self, kind: AssignmentKind) -> AssignmentHistoryQuery {
        AssignmentHistoryQuery {
            kind,
            source_id: self.source_id,
            target_id: self.target_id,
            include_inactive: self.include_inactive,
        }
    }
}

/// API representation of one assignment edge.
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub assignment_id: Uuid,
    pub kind: AssignmentKind,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub is_active: bool,
    pub assigned_at: DateTime<Utc>,
    pub assigned_by: Option<Uuid>,
}

impl From<Assignment> for AssignmentResponse {
    fn from(value: Assignment) -> Self {
        Self {
            assignment_id: value.assignment_id.as_uuid(),
            kind: value.kind,
            source_id: value.source_id,
            target_id: value.target_id,
            is_active: value.is_active,
            assigned_at: value.assigned_at,
            assigned_by: value.assigned_by.map(|user_id| user_id.as_uuid()),
        }
    }
}

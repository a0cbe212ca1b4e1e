use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use keyward_domain::AssignmentKind;
use uuid::Uuid;

use crate::dto::{AssignRequest, AssignmentHistoryParams, AssignmentResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn assign_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(payload): Json<AssignRequest>,
) -> ApiResult<(StatusCode, Json<AssignmentResponse>)> {
    let kind = AssignmentKind::from_str(kind.as_str())?;
    let assignment = state
        .assignment_service
        .assign(payload.into_request(kind))
        .await?;

    Ok((StatusCode::CREATED, Json(AssignmentResponse::from(assignment))))
}

pub async fn remove_assignment_handler(
    State(state): State<AppState>,
    Path((kind, source_id, target_id)): Path<(String, Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let kind = AssignmentKind::from_str(kind.as_str())?;
    state
        .assignment_service
        .remove(kind, source_id, target_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_assignments_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<AssignmentHistoryParams>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let kind = AssignmentKind::from_str(kind.as_str())?;
    let assignments = state
        .assignment_service
        .list_assignments(params.into_query(kind))
        .await?
        .into_iter()
        .map(AssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

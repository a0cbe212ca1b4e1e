use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use keyward_core::PermissionId;
use uuid::Uuid;

use crate::dto::{
    CreatePermissionRequest, PermissionListParams, PermissionResponse, UpdatePermissionRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionResponse>)> {
    let permission = state
        .directory_service
        .create_permission(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(PermissionResponse::from(permission))))
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Query(params): Query<PermissionListParams>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .directory_service
        .list_permissions(params.into_query()?)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn get_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<Uuid>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .directory_service
        .get_permission(PermissionId::from_uuid(permission_id))
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}

pub async fn update_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<Uuid>,
    Json(payload): Json<UpdatePermissionRequest>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .directory_service
        .update_permission(PermissionId::from_uuid(permission_id), payload.into())
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}

pub async fn delete_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<Uuid>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .directory_service
        .soft_delete_permission(PermissionId::from_uuid(permission_id))
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}

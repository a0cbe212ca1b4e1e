use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use keyward_core::GroupId;
use uuid::Uuid;

use crate::dto::{
    CreateGroupRequest, GroupResponse, ListParams, PermissionResponse, RoleResponse,
    UpdateGroupRequest, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_group_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateGroupRequest>,
) -> ApiResult<(StatusCode, Json<GroupResponse>)> {
    let group = state.directory_service.create_group(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

pub async fn list_groups_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<GroupResponse>>> {
    let groups = state
        .directory_service
        .list_groups(params.scoped_query()?)
        .await?
        .into_iter()
        .map(GroupResponse::from)
        .collect();

    Ok(Json(groups))
}

pub async fn get_group_handler(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<GroupResponse>> {
    let group = state
        .directory_service
        .get_group(GroupId::from_uuid(group_id))
        .await?;

    Ok(Json(GroupResponse::from(group)))
}

pub async fn update_group_handler(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<UpdateGroupRequest>,
) -> ApiResult<Json<GroupResponse>> {
    let group = state
        .directory_service
        .update_group(GroupId::from_uuid(group_id), payload.into())
        .await?;

    Ok(Json(GroupResponse::from(group)))
}

pub async fn delete_group_handler(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<GroupResponse>> {
    let group = state
        .directory_service
        .soft_delete_group(GroupId::from_uuid(group_id))
        .await?;

    Ok(Json(GroupResponse::from(group)))
}

pub async fn list_group_users_handler(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .assignment_service
        .list_group_users(GroupId::from_uuid(group_id))
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn list_group_roles_handler(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .assignment_service
        .list_group_roles(GroupId::from_uuid(group_id))
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn list_group_permissions_handler(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .assignment_service
        .list_group_permissions(GroupId::from_uuid(group_id))
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use keyward_core::UserId;
use uuid::Uuid;

use crate::dto::{
    CreateUserRequest, GroupResponse, ListParams, PermissionResponse, RoleResponse,
    UpdateUserRequest, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.directory_service.create_user(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .directory_service
        .list_users(params.scoped_query()?)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .directory_service
        .get_user(UserId::from_uuid(user_id))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .directory_service
        .update_user(UserId::from_uuid(user_id), payload.into())
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .directory_service
        .soft_delete_user(UserId::from_uuid(user_id))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn list_user_roles_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .assignment_service
        .list_user_roles(UserId::from_uuid(user_id))
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn list_user_groups_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<GroupResponse>>> {
    let groups = state
        .assignment_service
        .list_user_groups(UserId::from_uuid(user_id))
        .await?
        .into_iter()
        .map(GroupResponse::from)
        .collect();

    Ok(Json(groups))
}

/// Lists direct grants only; see the effective permission handler for the resolved set.
pub async fn list_user_permissions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .assignment_service
        .list_user_permissions(UserId::from_uuid(user_id))
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

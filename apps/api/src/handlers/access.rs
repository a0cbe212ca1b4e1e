use axum::Json;
use axum::extract::{Path, Query, State};
use keyward_core::UserId;
use uuid::Uuid;

use crate::dto::{
    AuthorizationResponse, AuthorizeParams, EffectivePermissionResponse,
    EffectivePermissionsParams, EffectivePermissionsResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn effective_permissions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<EffectivePermissionsParams>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let resolver = &state.permission_resolver;
    let permissions: Vec<EffectivePermissionResponse> = if params.explain {
        resolver
            .explain_effective_permissions(UserId::from_uuid(user_id))
            .await?
            .into_iter()
            .map(EffectivePermissionResponse::from)
            .collect()
    } else {
        resolver
            .resolve_effective_permissions(UserId::from_uuid(user_id))
            .await?
            .into_iter()
            .map(EffectivePermissionResponse::from)
            .collect()
    };

    Ok(Json(EffectivePermissionsResponse {
        user_id,
        permissions,
    }))
}

pub async fn authorize_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<AuthorizeParams>,
) -> ApiResult<Json<AuthorizationResponse>> {
    let allowed = state
        .permission_resolver
        .has_permission(
            UserId::from_uuid(user_id),
            params.resource.trim(),
            params.action.trim(),
        )
        .await?;

    Ok(Json(AuthorizationResponse {
        user_id,
        resource: params.resource,
        action: params.action,
        allowed,
    }))
}

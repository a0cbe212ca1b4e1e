use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use keyward_core::TenantId;
use uuid::Uuid;

use crate::dto::{CreateTenantRequest, ListParams, TenantResponse, UpdateTenantRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_tenant_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateTenantRequest>,
) -> ApiResult<(StatusCode, Json<TenantResponse>)> {
    let tenant = state
        .directory_service
        .create_tenant(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(TenantResponse::from(tenant))))
}

pub async fn list_tenants_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<TenantResponse>>> {
    let tenants = state
        .directory_service
        .list_tenants(params.tenant_query()?)
        .await?
        .into_iter()
        .map(TenantResponse::from)
        .collect();

    Ok(Json(tenants))
}

pub async fn get_tenant_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> ApiResult<Json<TenantResponse>> {
    let tenant = state
        .directory_service
        .get_tenant(TenantId::from_uuid(tenant_id))
        .await?;

    Ok(Json(TenantResponse::from(tenant)))
}

pub async fn update_tenant_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<UpdateTenantRequest>,
) -> ApiResult<Json<TenantResponse>> {
    let tenant = state
        .directory_service
        .update_tenant(TenantId::from_uuid(tenant_id), payload.into())
        .await?;

    Ok(Json(TenantResponse::from(tenant)))
}

pub async fn delete_tenant_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> ApiResult<Json<TenantResponse>> {
    let tenant = state
        .directory_service
        .soft_delete_tenant(TenantId::from_uuid(tenant_id))
        .await?;

    Ok(Json(TenantResponse::from(tenant)))
}

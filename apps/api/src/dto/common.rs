use keyward_application::{PermissionQuery, TenantQuery, TenantScopedQuery};
use keyward_core::{AppResult, PageRequest, TenantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query string accepted by tenant, user, role and group listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub tenant_id: Option<Uuid>,
    #[serde(default)]
    pub include_inactive: bool,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn tenant_query(&self) -> AppResult<TenantQuery> {
        Ok(TenantQuery {
            include_inactive: self.include_inactive,
            page: PageRequest::new(self.skip, self.limit)?,
        })
    }

    pub fn scoped_query(&self) -> AppResult<TenantScopedQuery> {
        Ok(TenantScopedQuery {
            tenant_id: self.tenant_id.map(TenantId::from_uuid),
            include_inactive: self.include_inactive,
            page: PageRequest::new(self.skip, self.limit)?,
        })
    }
}

/// Query string accepted by the permission listing.
#[derive(Debug, Default, Deserialize)]
pub struct PermissionListParams {
    pub resource: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl PermissionListParams {
    pub fn into_query(self) -> AppResult<PermissionQuery> {
        Ok(PermissionQuery {
            page: PageRequest::new(self.skip, self.limit)?,
            resource: self.resource.filter(|resource| !resource.trim().is_empty()),
            include_inactive: self.include_inactive,
        })
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use keyward_application::{
    AssignmentQuery, AssignmentRepository, AssignmentRequest, AssignmentService,
    AssignmentWrite, DirectoryRepositories, DirectoryService, PermissionResolver, RoleRepository,
    TenantRepository, TenantScopedQuery, UserRepository,
};
use keyward_core::{AppError, AppResult, RoleId, TenantId};
use keyward_domain::{Assignment, AssignmentKind, Permission, Role, Tenant, User};

use super::InMemoryDirectoryStore;

async fn seeded_tenant(store: &InMemoryDirectoryStore, name: &str) -> Tenant {
    let tenant = Tenant::new(name).unwrap_or_else(|_| unreachable!());
    store
        .insert_tenant(tenant)
        .await
        .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn role_names_are_unique_per_tenant() {
    let store = InMemoryDirectoryStore::new();
    let acme = seeded_tenant(&store, "acme").await;
    let globex = seeded_tenant(&store, "globex").await;

    let first = Role::new(acme.tenant_id, "admin", None, false).unwrap_or_else(|_| unreachable!());
    let duplicate =
        Role::new(acme.tenant_id, "admin", None, false).unwrap_or_else(|_| unreachable!());
    let elsewhere =
        Role::new(globex.tenant_id, "admin", None, false).unwrap_or_else(|_| unreachable!());

    assert!(store.insert_role(first).await.is_ok());
    assert!(matches!(
        store.insert_role(duplicate).await,
        Err(AppError::Conflict(_))
    ));
    assert!(store.insert_role(elsewhere).await.is_ok());
}

#[tokio::test]
async fn children_of_unknown_tenants_are_rejected() {
    let store = InMemoryDirectoryStore::new();
    let user = User::new(TenantId::new(), "ada@example.com", "Ada", "Lovelace")
        .unwrap_or_else(|_| unreachable!());

    assert!(matches!(
        store.insert_user(user).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_cannot_flip_the_system_flag() {
    let store = InMemoryDirectoryStore::new();
    let tenant = seeded_tenant(&store, "acme").await;
    let role = Role::new(tenant.tenant_id, "owner", None, true).unwrap_or_else(|_| unreachable!());
    let role = store
        .insert_role(role)
        .await
        .unwrap_or_else(|_| unreachable!());

    let updated = store
        .update_role(Role {
            is_system_role: false,
            ..role
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(updated.is_system_role);
}

#[tokio::test]
async fn listing_pages_in_name_order() {
    let store = InMemoryDirectoryStore::new();
    let tenant = seeded_tenant(&store, "acme").await;
    for email in ["c@example.com", "a@example.com", "b@example.com"] {
        let user =
            User::new(tenant.tenant_id, email, "Test", "User").unwrap_or_else(|_| unreachable!());
        assert!(store.insert_user(user).await.is_ok());
    }

    let listed = store
        .list_users(TenantScopedQuery {
            tenant_id: Some(tenant.tenant_id),
            include_inactive: false,
            page: keyward_core::PageRequest::new(Some(1), Some(5))
                .unwrap_or_else(|_| unreachable!()),
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    let emails: Vec<&str> = listed.iter().map(|user| user.email.as_str()).collect();
    assert_eq!(emails, vec!["b@example.com", "c@example.com"]);
}

async fn seeded_user_and_role(store: &InMemoryDirectoryStore, tenant: &Tenant) -> (User, Role) {
    let user = User::new(tenant.tenant_id, "ada@example.com", "Ada", "Lovelace")
        .unwrap_or_else(|_| unreachable!());
    let user = store
        .insert_user(user)
        .await
        .unwrap_or_else(|_| unreachable!());
    let role = Role::new(tenant.tenant_id, "admin", None, false).unwrap_or_else(|_| unreachable!());
    let role = store
        .insert_role(role)
        .await
        .unwrap_or_else(|_| unreachable!());
    (user, role)
}

#[tokio::test]
async fn edge_writes_reuse_the_pair_row_and_state_changes_are_conditional() {
    let store = InMemoryDirectoryStore::new();
    let tenant = seeded_tenant(&store, "acme").await;
    let (user, role) = seeded_user_and_role(&store, &tenant).await;
    let request = AssignmentRequest {
        kind: AssignmentKind::UserRole,
        source_id: user.user_id.as_uuid(),
        target_id: role.role_id.as_uuid(),
        assigned_by: None,
    };

    let created = match store.write_assignment(request, Utc::now()).await {
        Ok(AssignmentWrite::Created(edge)) => edge,
        other => panic!("expected a created edge, got {other:?}"),
    };
    assert!(matches!(
        store.write_assignment(request, Utc::now()).await,
        Ok(AssignmentWrite::AlreadyActive(edge)) if edge.assignment_id == created.assignment_id
    ));

    let removed = store
        .deactivate_assignment(request.kind, request.source_id, request.target_id)
        .await;
    assert!(matches!(removed, Ok(Some(row)) if !row.is_active));
    let removed_again = store
        .deactivate_assignment(request.kind, request.source_id, request.target_id)
        .await;
    assert!(matches!(removed_again, Ok(None)));

    assert!(matches!(
        store.write_assignment(request, Utc::now()).await,
        Ok(AssignmentWrite::Reactivated(edge))
            if edge.assignment_id == created.assignment_id && edge.is_active
    ));

    let history = store
        .list_assignments(AssignmentQuery {
            kind: request.kind,
            source_ids: Some(vec![request.source_id]),
            target_ids: None,
            active_only: false,
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn edge_write_rechecks_endpoints_under_the_lock() {
    let store = InMemoryDirectoryStore::new();
    let tenant = seeded_tenant(&store, "acme").await;
    let (user, role) = seeded_user_and_role(&store, &tenant).await;
    let inactive = store
        .update_role(Role {
            is_active: false,
            ..role
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    let missing_target = store
        .write_assignment(
            AssignmentRequest {
                kind: AssignmentKind::UserPermission,
                source_id: user.user_id.as_uuid(),
                target_id: Uuid::new_v4(),
                assigned_by: None,
            },
            Utc::now(),
        )
        .await;
    assert!(matches!(missing_target, Err(AppError::NotFound(_))));

    let inactive_target = store
        .write_assignment(
            AssignmentRequest {
                kind: AssignmentKind::UserRole,
                source_id: user.user_id.as_uuid(),
                target_id: inactive.role_id.as_uuid(),
                assigned_by: None,
            },
            Utc::now(),
        )
        .await;
    assert!(matches!(inactive_target, Err(AppError::NotFound(_))));

    let edges = store
        .list_assignments(AssignmentQuery {
            kind: AssignmentKind::UserRole,
            source_ids: Some(vec![user.user_id.as_uuid()]),
            target_ids: None,
            active_only: false,
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(edges.is_empty());
}

/// Soft-deletes a role after the service prechecks pass but before the edge
/// write runs.
struct RoleDeletedBeforeWrite {
    store: Arc<InMemoryDirectoryStore>,
    directory: DirectoryService,
    role_id: RoleId,
}

#[async_trait]
impl AssignmentRepository for RoleDeletedBeforeWrite {
    async fn write_assignment(
        &self,
        request: AssignmentRequest,
        assigned_at: DateTime<Utc>,
    ) -> AppResult<AssignmentWrite> {
        self.directory
            .soft_delete_role(self.role_id)
            .await
            .unwrap_or_else(|error| panic!("soft delete failed: {error}"));
        self.store.write_assignment(request, assigned_at).await
    }

    async fn deactivate_assignment(
        &self,
        kind: AssignmentKind,
        source_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<Option<Assignment>> {
        self.store
            .deactivate_assignment(kind, source_id, target_id)
            .await
    }

    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Vec<Assignment>> {
        self.store.list_assignments(query).await
    }
}

#[tokio::test]
async fn role_deleted_between_precheck_and_write_yields_no_edge() {
    let store = Arc::new(InMemoryDirectoryStore::new());
    let tenant = seeded_tenant(&store, "acme").await;
    let (user, role) = seeded_user_and_role(&store, &tenant).await;
    let repositories = DirectoryRepositories::from_store(store.clone());
    let racing = Arc::new(RoleDeletedBeforeWrite {
        store: store.clone(),
        directory: DirectoryService::new(repositories.clone()),
        role_id: role.role_id,
    });
    let service = AssignmentService::new(repositories, racing);

    let result = service
        .assign(AssignmentRequest {
            kind: AssignmentKind::UserRole,
            source_id: user.user_id.as_uuid(),
            target_id: role.role_id.as_uuid(),
            assigned_by: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    let active = store
        .list_assignments(AssignmentQuery::active_from(
            AssignmentKind::UserRole,
            vec![user.user_id.as_uuid()],
        ))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(active.is_empty());
}

#[tokio::test]
async fn concurrent_assigns_of_one_pair_produce_one_winner() {
    let store = Arc::new(InMemoryDirectoryStore::new());
    let tenant = seeded_tenant(&store, "acme").await;
    let (user, role) = seeded_user_and_role(&store, &tenant).await;

    let service = AssignmentService::new(DirectoryRepositories::from_store(store.clone()), store.clone());
    let request = AssignmentRequest {
        kind: AssignmentKind::UserRole,
        source_id: user.user_id.as_uuid(),
        target_id: role.role_id.as_uuid(),
        assigned_by: None,
    };

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move { service.assign(request).await }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await {
            Ok(Ok(_)) => created += 1,
            Ok(Err(AppError::AlreadyAssigned(_))) => {}
            Ok(Err(error)) => panic!("unexpected error: {error}"),
            Err(error) => panic!("task failed: {error}"),
        }
    }

    assert_eq!(created, 1);
}

#[tokio::test]
async fn resolver_reads_through_the_store() {
    let store = Arc::new(InMemoryDirectoryStore::new());
    let tenant = seeded_tenant(&store, "acme").await;
    let user = store
        .insert_user(
            User::new(tenant.tenant_id, "ada@example.com", "Ada", "Lovelace")
                .unwrap_or_else(|_| unreachable!()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    let permission = Permission::new("users.read", "users", "read", None)
        .unwrap_or_else(|_| unreachable!());
    let permission = keyward_application::PermissionRepository::insert_permission(
        store.as_ref(),
        permission,
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    let repositories = DirectoryRepositories::from_store(store.clone());
    let assignments = AssignmentService::new(repositories.clone(), store.clone());
    let resolver = PermissionResolver::new(repositories, store.clone());

    assert!(
        assignments
            .assign(AssignmentRequest {
                kind: AssignmentKind::UserPermission,
                source_id: user.user_id.as_uuid(),
                target_id: permission.permission_id.as_uuid(),
                assigned_by: None,
            })
            .await
            .is_ok()
    );

    assert!(matches!(
        resolver.has_permission(user.user_id, "users", "read").await,
        Ok(true)
    ));
}

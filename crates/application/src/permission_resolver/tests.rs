use chrono::Utc;
use keyward_core::{AppError, UserId};
use keyward_domain::{AssignmentKind, GrantSource};
use uuid::Uuid;

use crate::test_support::Harness;
use crate::{AssignmentRepository, AssignmentRequest, AssignmentWrite};

async fn link(harness: &Harness, kind: AssignmentKind, source_id: Uuid, target_id: Uuid) {
    harness
        .assignments
        .assign(AssignmentRequest {
            kind,
            source_id,
            target_id,
            assigned_by: None,
        })
        .await
        .unwrap_or_else(|_| unreachable!());
}

#[tokio::test]
async fn admin_role_scenario_grants_then_revokes() {
    let harness = Harness::new();
    let tenant = harness.tenant("T").await;
    let role = harness.role(tenant.tenant_id, "admin", false).await;
    let permission = harness.permission("users", "read").await;
    link(
        &harness,
        AssignmentKind::RolePermission,
        role.role_id.as_uuid(),
        permission.permission_id.as_uuid(),
    )
    .await;
    let user = harness.user(tenant.tenant_id, "u@example.com").await;
    link(
        &harness,
        AssignmentKind::UserRole,
        user.user_id.as_uuid(),
        role.role_id.as_uuid(),
    )
    .await;

    let granted = harness
        .resolver
        .resolve_effective_permissions(user.user_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(granted, vec![permission]);

    harness
        .assignments
        .remove(
            AssignmentKind::UserRole,
            user.user_id.as_uuid(),
            role.role_id.as_uuid(),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let revoked = harness
        .resolver
        .resolve_effective_permissions(user.user_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(revoked.is_empty());
}

#[tokio::test]
async fn direct_and_role_grants_are_deduplicated() {
    let harness = Harness::new();
    let tenant = harness.tenant("acme").await;
    let user = harness.user(tenant.tenant_id, "ada@example.com").await;
    let role = harness.role(tenant.tenant_id, "editor", false).await;
    let read = harness.permission("documents", "read").await;
    let write = harness.permission("documents", "write").await;

    link(
        &harness,
        AssignmentKind::UserPermission,
        user.user_id.as_uuid(),
        read.permission_id.as_uuid(),
    )
    .await;
    for permission in [&read, &write] {
        link(
            &harness,
            AssignmentKind::RolePermission,
            role.role_id.as_uuid(),
            permission.permission_id.as_uuid(),
        )
        .await;
    }
    link(
        &harness,
        AssignmentKind::UserRole,
        user.user_id.as_uuid(),
        role.role_id.as_uuid(),
    )
    .await;

    let explained = harness
        .resolver
        .explain_effective_permissions(user.user_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(explained.len(), 2);
    assert_eq!(explained[0].permission.permission_id, read.permission_id);
    assert!(explained[0].sources.contains(&GrantSource::Direct));
    assert!(explained[0].sources.contains(&GrantSource::Role {
        role_id: role.role_id
    }));
    assert_eq!(explained[1].permission.permission_id, write.permission_id);
    assert_eq!(explained[1].sources.len(), 1);
}

#[tokio::test]
async fn group_paths_contribute_permissions() {
    let harness = Harness::new();
    let tenant = harness.tenant("acme").await;
    let user = harness.user(tenant.tenant_id, "ada@example.com").await;
    let group = harness.group(tenant.tenant_id, "ops").await;
    let role = harness.role(tenant.tenant_id, "deployer", false).await;
    let deploy = harness.permission("services", "deploy").await;
    let page = harness.permission("alerts", "ack").await;

    link(
        &harness,
        AssignmentKind::UserGroup,
        user.user_id.as_uuid(),
        group.group_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::GroupPermission,
        group.group_id.as_uuid(),
        page.permission_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::GroupRole,
        group.group_id.as_uuid(),
        role.role_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::RolePermission,
        role.role_id.as_uuid(),
        deploy.permission_id.as_uuid(),
    )
    .await;

    let explained = harness
        .resolver
        .explain_effective_permissions(user.user_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(explained.len(), 2);
    assert_eq!(explained[0].permission.permission_id, page.permission_id);
    assert!(explained[0].sources.contains(&GrantSource::Group {
        group_id: group.group_id
    }));
    assert_eq!(explained[1].permission.permission_id, deploy.permission_id);
    assert!(explained[1].sources.contains(&GrantSource::GroupRole {
        group_id: group.group_id,
        role_id: role.role_id,
    }));

    assert!(matches!(
        harness
            .resolver
            .has_permission(user.user_id, "services", "deploy")
            .await,
        Ok(true)
    ));
}

#[tokio::test]
async fn inactive_links_and_targets_are_skipped() {
    let harness = Harness::new();
    let tenant = harness.tenant("acme").await;
    let user = harness.user(tenant.tenant_id, "ada@example.com").await;
    let role = harness.role(tenant.tenant_id, "editor", false).await;
    let group = harness.group(tenant.tenant_id, "ops").await;
    let retired = harness.permission("legacy", "read").await;
    let via_group = harness.permission("reports", "read").await;

    link(
        &harness,
        AssignmentKind::UserPermission,
        user.user_id.as_uuid(),
        retired.permission_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::UserRole,
        user.user_id.as_uuid(),
        role.role_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::RolePermission,
        role.role_id.as_uuid(),
        via_group.permission_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::UserGroup,
        user.user_id.as_uuid(),
        group.group_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::GroupPermission,
        group.group_id.as_uuid(),
        via_group.permission_id.as_uuid(),
    )
    .await;

    harness
        .directory
        .soft_delete_permission(retired.permission_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    harness
        .directory
        .soft_delete_role(role.role_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    harness
        .directory
        .soft_delete_group(group.group_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    let permissions = harness
        .resolver
        .resolve_effective_permissions(user.user_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(permissions.is_empty());
}

/// Writes an edge straight into the store, skipping the tenant check the
/// assignment service applies.
async fn store_link(harness: &Harness, kind: AssignmentKind, source_id: Uuid, target_id: Uuid) {
    let written = harness
        .store
        .write_assignment(
            AssignmentRequest {
                kind,
                source_id,
                target_id,
                assigned_by: None,
            },
            Utc::now(),
        )
        .await;
    assert!(matches!(written, Ok(AssignmentWrite::Created(_))));
}

#[tokio::test]
async fn cross_tenant_edges_in_storage_grant_nothing() {
    let harness = Harness::new();
    let acme = harness.tenant("acme").await;
    let globex = harness.tenant("globex").await;
    let user = harness.user(acme.tenant_id, "ada@example.com").await;
    let local_group = harness.group(acme.tenant_id, "ops").await;
    let foreign_role = harness.role(globex.tenant_id, "admin", false).await;
    let foreign_group_role = harness.role(globex.tenant_id, "auditor", false).await;
    let foreign_group = harness.group(globex.tenant_id, "ops").await;

    let local = harness.permission("profile", "read").await;
    let via_role = harness.permission("billing", "write").await;
    let via_group = harness.permission("reports", "export").await;
    let via_group_role = harness.permission("audit", "read").await;

    link(
        &harness,
        AssignmentKind::UserPermission,
        user.user_id.as_uuid(),
        local.permission_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::RolePermission,
        foreign_role.role_id.as_uuid(),
        via_role.permission_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::GroupPermission,
        foreign_group.group_id.as_uuid(),
        via_group.permission_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::RolePermission,
        foreign_group_role.role_id.as_uuid(),
        via_group_role.permission_id.as_uuid(),
    )
    .await;
    link(
        &harness,
        AssignmentKind::UserGroup,
        user.user_id.as_uuid(),
        local_group.group_id.as_uuid(),
    )
    .await;

    store_link(
        &harness,
        AssignmentKind::UserRole,
        user.user_id.as_uuid(),
        foreign_role.role_id.as_uuid(),
    )
    .await;
    store_link(
        &harness,
        AssignmentKind::UserGroup,
        user.user_id.as_uuid(),
        foreign_group.group_id.as_uuid(),
    )
    .await;
    store_link(
        &harness,
        AssignmentKind::GroupRole,
        local_group.group_id.as_uuid(),
        foreign_group_role.role_id.as_uuid(),
    )
    .await;

    let effective = harness
        .resolver
        .resolve_effective_permissions(user.user_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(effective, vec![local]);

    for (resource, action) in [("billing", "write"), ("reports", "export"), ("audit", "read")] {
        let allowed = harness
            .resolver
            .has_permission(user.user_id, resource, action)
            .await;
        assert!(matches!(allowed, Ok(false)));
    }
}

#[tokio::test]
async fn inactive_user_or_tenant_resolves_to_nothing() {
    let harness = Harness::new();
    let tenant = harness.tenant("acme").await;
    let user = harness.user(tenant.tenant_id, "ada@example.com").await;
    let permission = harness.permission("users", "read").await;
    link(
        &harness,
        AssignmentKind::UserPermission,
        user.user_id.as_uuid(),
        permission.permission_id.as_uuid(),
    )
    .await;

    harness
        .directory
        .soft_delete_tenant(tenant.tenant_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    let permissions = harness
        .resolver
        .resolve_effective_permissions(user.user_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(permissions.is_empty());

    let denied = harness
        .resolver
        .require_permission(user.user_id, "users", "read")
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let harness = Harness::new();
    let result = harness
        .resolver
        .resolve_effective_permissions(UserId::new())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

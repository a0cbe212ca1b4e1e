use axum::Router;
use axum::routing::{delete, get};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let directory_routes = Router::new()
        .route(
            "/api/tenants",
            get(handlers::tenants::list_tenants_handler)
                .post(handlers::tenants::create_tenant_handler),
        )
        .route(
            "/api/tenants/{tenant_id}",
            get(handlers::tenants::get_tenant_handler)
                .put(handlers::tenants::update_tenant_handler)
                .delete(handlers::tenants::delete_tenant_handler),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::delete_user_handler),
        )
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            get(handlers::roles::get_role_handler)
                .put(handlers::roles::update_role_handler)
                .delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/api/groups",
            get(handlers::groups::list_groups_handler)
                .post(handlers::groups::create_group_handler),
        )
        .route(
            "/api/groups/{group_id}",
            get(handlers::groups::get_group_handler)
                .put(handlers::groups::update_group_handler)
                .delete(handlers::groups::delete_group_handler),
        )
        .route(
            "/api/permissions",
            get(handlers::permissions::list_permissions_handler)
                .post(handlers::permissions::create_permission_handler),
        )
        .route(
            "/api/permissions/{permission_id}",
            get(handlers::permissions::get_permission_handler)
                .put(handlers::permissions::update_permission_handler)
                .delete(handlers::permissions::delete_permission_handler),
        );

    let assignment_routes = Router::new()
        .route(
            "/api/assignments/{kind}",
            get(handlers::assignments::list_assignments_handler)
                .post(handlers::assignments::assign_handler),
        )
        .route(
            "/api/assignments/{kind}/{source_id}/{target_id}",
            delete(handlers::assignments::remove_assignment_handler),
        )
        .route(
            "/api/users/{user_id}/roles",
            get(handlers::users::list_user_roles_handler),
        )
        .route(
            "/api/users/{user_id}/groups",
            get(handlers::users::list_user_groups_handler),
        )
        .route(
            "/api/users/{user_id}/permissions",
            get(handlers::users::list_user_permissions_handler),
        )
        .route(
            "/api/groups/{group_id}/users",
            get(handlers::groups::list_group_users_handler),
        )
        .route(
            "/api/groups/{group_id}/roles",
            get(handlers::groups::list_group_roles_handler),
        )
        .route(
            "/api/groups/{group_id}/permissions",
            get(handlers::groups::list_group_permissions_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions",
            get(handlers::roles::list_role_permissions_handler),
        );

    let access_routes = Router::new()
        .route(
            "/api/users/{user_id}/effective-permissions",
            get(handlers::access::effective_permissions_handler),
        )
        .route(
            "/api/users/{user_id}/authorize",
            get(handlers::access::authorize_handler),
        );

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(directory_routes)
        .merge(assignment_routes)
        .merge(access_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

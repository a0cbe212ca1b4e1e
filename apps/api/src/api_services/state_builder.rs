use std::sync::Arc;

use keyward_application::{
    AssignmentRepository, AssignmentService, DirectoryRepositories, DirectoryService,
    PermissionResolver,
};
use keyward_infrastructure::{
    InMemoryDirectoryStore, PostgresAssignmentRepository, PostgresDirectoryRepository,
};
use sqlx::PgPool;

use crate::state::AppState;

/// Wires the services over Postgres adapters.
pub fn build_app_state(pool: PgPool) -> AppState {
    let directory = Arc::new(PostgresDirectoryRepository::new(pool.clone()));
    let assignments: Arc<dyn AssignmentRepository> =
        Arc::new(PostgresAssignmentRepository::new(pool));

    compose(DirectoryRepositories::from_store(directory), assignments)
}

/// Wires the services over one process-local store.
pub fn in_memory_app_state() -> AppState {
    let store = Arc::new(InMemoryDirectoryStore::new());
    let assignments: Arc<dyn AssignmentRepository> = store.clone();

    compose(DirectoryRepositories::from_store(store), assignments)
}

fn compose(
    repositories: DirectoryRepositories,
    assignments: Arc<dyn AssignmentRepository>,
) -> AppState {
    AppState {
        directory_service: DirectoryService::new(repositories.clone()),
        assignment_service: AssignmentService::new(repositories.clone(), assignments.clone()),
        permission_resolver: PermissionResolver::new(repositories, assignments),
    }
}

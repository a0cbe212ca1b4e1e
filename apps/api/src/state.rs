use keyward_application::{AssignmentService, DirectoryService, PermissionResolver};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub directory_service: DirectoryService,
    pub assignment_service: AssignmentService,
    pub permission_resolver: PermissionResolver,
}

//! Application services and ports.

#![forbid(unsafe_code)]

mod assignment_ports;
mod assignment_service;
mod directory_ports;
mod directory_service;
mod permission_resolver;

#[cfg(test)]
mod test_support;

pub use assignment_ports::{
    AssignmentQuery, AssignmentRepository, AssignmentRequest, AssignmentWrite,
};
pub use assignment_service::{AssignmentHistoryQuery, AssignmentService};
pub use directory_ports::{
    CreateGroupInput, CreatePermissionInput, CreateRoleInput, CreateTenantInput, CreateUserInput,
    DirectoryRepositories, GroupRepository, PermissionQuery, PermissionRepository, RoleRepository,
    TenantQuery, TenantRepository, TenantScopedQuery, UpdateGroupInput, UpdatePermissionInput,
    UpdateRoleInput, UpdateTenantInput, UpdateUserInput, UserRepository,
};
pub use directory_service::DirectoryService;
pub use permission_resolver::PermissionResolver;

pub mod access;
pub mod assignments;
pub mod groups;
pub mod health;
pub mod permissions;
pub mod roles;
pub mod tenants;
pub mod users;

//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_directory_store;
mod postgres_assignment_repository;
mod postgres_directory_repository;
mod postgres_errors;

pub use in_memory_directory_store::InMemoryDirectoryStore;
pub use postgres_assignment_repository::PostgresAssignmentRepository;
pub use postgres_directory_repository::PostgresDirectoryRepository;

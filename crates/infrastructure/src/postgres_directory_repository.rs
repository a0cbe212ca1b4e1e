use sqlx::PgPool;

mod groups;
mod permissions;
mod roles;
mod tenants;
mod users;


/// PostgreSQL-backed repository for tenants, users, roles, groups and permissions.
#[derive(Clone)]
pub struct PostgresDirectoryRepository {
    pool: PgPool,
}

impl PostgresDirectoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

use sqlx::PgPool;

use crate::Database;

/// Postgres-backed implementation of every repository trait
#[derive(Debug, Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<&Database> for PgStore {
    fn from(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }
}

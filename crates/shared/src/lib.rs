mod command;

pub use command::*;

/// Connection pools shared by every command and query.
///
/// Writes go through a single-connection pool, reads through a wider one.
#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    /// Uses the same pool for reads and writes, handy for tests and CLI commands.
    pub fn single(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

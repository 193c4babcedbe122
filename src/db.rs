use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

const MAX_POOL_CONNECTIONS: u32 = 20;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Table definitions, run in order at startup. There's no migration versioning, tables are
/// only created when they don't exist yet.
const SCHEMA_STATEMENTS: [&str; 2] = [
    r#"CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR NOT NULL UNIQUE,
        hashed_password VARCHAR NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        user_id INTEGER REFERENCES users(id),
        title VARCHAR NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        priority VARCHAR NOT NULL DEFAULT 'medium',
        due_date DATE
    )"#,
];

/// Builds a connection pool for the database at [db_url]
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, anyhow::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_POOL_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(db_url)
        .await
        .context("connecting to the database")
}

/// Creates the `users` and `todos` tables if they are missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), anyhow::Error> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("creating database tables")?;
    }
    info!("Database schema is in place");

    Ok(())
}

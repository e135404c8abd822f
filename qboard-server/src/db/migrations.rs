//! Schema bootstrap for the questions table
//!
//! Safe to run on every startup: everything is IF NOT EXISTS.

use sqlx::SqlitePool;

/// Ensure the questions table and its indexes exist.
///
/// AUTOINCREMENT is deliberate: without it SQLite may reuse the highest
/// rowid after a delete, and ids must never be reassigned.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema bootstrap...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            votes INTEGER NOT NULL DEFAULT 0,
            hidden INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Schema bootstrap complete");
    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_votes ON questions(votes DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_created ON questions(created_at DESC)")
        .execute(pool)
        .await?;

    Ok(())
}

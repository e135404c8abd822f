//! Question repository
//!
//! Every operation is a single statement (the vote disambiguation read
//! aside), so there are no multi-statement transactions to manage.

use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::models::{ListOrder, Question, QuestionText};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("question {id} is hidden")]
    Hidden { id: i64 },
}

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List questions, optionally including hidden ones.
    ///
    /// `new` sorts newest-first; `top` sorts by votes descending with
    /// earlier submissions winning ties. No pagination: the board is
    /// bounded by one audience's worth of questions.
    pub async fn list(
        &self,
        include_hidden: bool,
        order: ListOrder,
    ) -> Result<Vec<Question>, DbError> {
        let where_clause = if include_hidden { "" } else { " WHERE hidden = 0" };
        let order_by = match order {
            ListOrder::New => "ORDER BY created_at DESC, id DESC",
            ListOrder::Top => "ORDER BY votes DESC, created_at ASC",
        };

        let sql = format!(
            "SELECT id, text, votes, hidden, created_at FROM questions{} {}",
            where_clause, order_by
        );

        let questions = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(questions)
    }

    /// Insert a new question and return the persisted record.
    ///
    /// `created_at` is assigned here, server-side, as a fixed-precision
    /// RFC 3339 UTC string so rows sort lexicographically by time.
    pub async fn create(&self, text: QuestionText) -> Result<Question, DbError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (text, votes, hidden, created_at)
            VALUES (?1, 0, 0, ?2)
            RETURNING id, text, votes, hidden, created_at
            "#,
        )
        .bind(text.as_str())
        .bind(&now)
        .fetch_one(self.pool)
        .await?;

        Ok(question)
    }

    /// Increment the vote count by exactly 1, returning the new count.
    ///
    /// The increment and the hidden gate are one guarded UPDATE, never a
    /// read-modify-write, so concurrent votes cannot lose updates.
    pub async fn vote(&self, id: i64) -> Result<i64, DbError> {
        let updated: Option<(i64,)> = sqlx::query_as(
            "UPDATE questions SET votes = votes + 1 WHERE id = ?1 AND hidden = 0 RETURNING votes",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        if let Some((votes,)) = updated {
            return Ok(votes);
        }

        // Zero rows matched: distinguish missing from hidden
        let row: Option<(bool,)> = sqlx::query_as("SELECT hidden FROM questions WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(_) => Err(DbError::Hidden { id }),
            None => Err(DbError::NotFound {
                resource: "question",
                id,
            }),
        }
    }

    /// Set the hidden flag and return the full updated record.
    ///
    /// Idempotent: setting a flag to its current value succeeds and
    /// returns the unchanged record.
    pub async fn set_hidden(&self, id: i64, hidden: bool) -> Result<Question, DbError> {
        sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions SET hidden = ?2 WHERE id = ?1
            RETURNING id, text, votes, hidden, created_at
            "#,
        )
        .bind(id)
        .bind(hidden)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "question",
            id,
        })
    }

    /// Hard-delete a question. The id is never reassigned.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "question",
                id,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        migrations::run(&pool).await.expect("migrations");
        pool
    }

    fn text(s: &str) -> QuestionText {
        QuestionText::new(s).expect("valid text")
    }

    #[tokio::test]
    async fn create_starts_at_zero_votes_visible() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let q = repo.create(text("Why Rust?")).await.unwrap();
        assert_eq!(q.text, "Why Rust?");
        assert_eq!(q.votes, 0);
        assert!(!q.hidden);
        assert!(q.id > 0);
    }

    #[tokio::test]
    async fn vote_increments_by_one() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let q = repo.create(text("first")).await.unwrap();
        assert_eq!(repo.vote(q.id).await.unwrap(), 1);
        assert_eq!(repo.vote(q.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn vote_missing_is_not_found() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let err = repo.vote(9999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn vote_hidden_is_rejected_and_count_unchanged() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let q = repo.create(text("soon hidden")).await.unwrap();
        repo.vote(q.id).await.unwrap();
        repo.set_hidden(q.id, true).await.unwrap();

        let err = repo.vote(q.id).await.unwrap_err();
        assert!(matches!(err, DbError::Hidden { .. }));

        let listed = repo.list(true, ListOrder::New).await.unwrap();
        assert_eq!(listed[0].votes, 1);
    }

    #[tokio::test]
    async fn set_hidden_is_idempotent() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let q = repo.create(text("hide me")).await.unwrap();
        let hidden = repo.set_hidden(q.id, true).await.unwrap();
        assert!(hidden.hidden);

        let again = repo.set_hidden(q.id, true).await.unwrap();
        assert!(again.hidden);
        assert_eq!(again.votes, hidden.votes);
        assert_eq!(again.created_at, hidden.created_at);
    }

    #[tokio::test]
    async fn delete_removes_row_and_id_is_not_reused() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let q = repo.create(text("doomed")).await.unwrap();
        repo.delete(q.id).await.unwrap();

        let err = repo.delete(q.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let next = repo.create(text("successor")).await.unwrap();
        assert!(next.id > q.id);
    }

    #[tokio::test]
    async fn list_filters_hidden_by_default() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let a = repo.create(text("visible")).await.unwrap();
        let b = repo.create(text("hidden")).await.unwrap();
        repo.set_hidden(b.id, true).await.unwrap();

        let visible = repo.list(false, ListOrder::New).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, a.id);

        let all = repo.list(true, ListOrder::New).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn top_order_breaks_vote_ties_by_creation_time() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let a = repo.create(text("A")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let b = repo.create(text("B")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let c = repo.create(text("C")).await.unwrap();

        for _ in 0..3 {
            repo.vote(a.id).await.unwrap();
            repo.vote(c.id).await.unwrap();
        }
        for _ in 0..5 {
            repo.vote(b.id).await.unwrap();
        }

        let top = repo.list(false, ListOrder::Top).await.unwrap();
        let ids: Vec<i64> = top.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![b.id, a.id, c.id]);
    }

    #[tokio::test]
    async fn new_order_is_newest_first() {
        let pool = test_pool().await;
        let repo = QuestionRepo::new(&pool);

        let first = repo.create(text("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.create(text("second")).await.unwrap();

        let listed = repo.list(false, ListOrder::New).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}

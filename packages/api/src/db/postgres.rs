use feedback_store::{Feedback, FeedbackStore, NewFeedback, StoreError, User, UserStore};
use sqlx::{FromRow, PgPool};

/// Database backed user
#[derive(FromRow)]
struct SqlUser {
    username: String,
    password: String,
    email: String,
    first_name: String,
    last_name: String,
}

impl SqlUser {
    fn into_user(self) -> User {
        User {
            username: self.username,
            password: self.password,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

/// Database backed feedback row
#[derive(FromRow)]
struct SqlFeedback {
    id: i32,
    title: String,
    content: String,
    username: String,
}

impl SqlFeedback {
    fn into_feedback(self) -> Feedback {
        Feedback {
            id: self.id,
            title: self.title,
            content: self.content,
            username: self.username,
        }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::backend(err)
}

/// Repository over a PostgreSQL pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgStore {
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<SqlUser> = sqlx::query_as(
            "SELECT username, password, email, first_name, last_name FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(SqlUser::into_user))
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (username, password, email, first_name, last_name) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Conflict),
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete_user(&self, username: &str) -> Result<bool, StoreError> {
        // feedback rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }
}

impl FeedbackStore for PgStore {
    async fn list_feedback(&self, username: &str) -> Result<Vec<Feedback>, StoreError> {
        let rows: Vec<SqlFeedback> = sqlx::query_as(
            "SELECT id, title, content, username FROM feedback WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(SqlFeedback::into_feedback).collect())
    }

    async fn get_feedback(&self, id: i32) -> Result<Option<Feedback>, StoreError> {
        let row: Option<SqlFeedback> =
            sqlx::query_as("SELECT id, title, content, username FROM feedback WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;
        Ok(row.map(SqlFeedback::into_feedback))
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let result: Result<SqlFeedback, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO feedback (title, content, username)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, username
            "#,
        )
        .bind(&feedback.title)
        .bind(&feedback.content)
        .bind(&feedback.username)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into_feedback()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(StoreError::UnknownUser(feedback.username))
            }
            Err(e) => Err(backend(e)),
        }
    }

    async fn update_feedback(&self, feedback: &Feedback) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE feedback SET title = $1, content = $2 WHERE id = $3")
            .bind(&feedback.title)
            .bind(&feedback.content)
            .bind(feedback.id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_feedback(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::accounts::repo_types::{Role, User};
use crate::error::AppResult;

// Uniqueness of email and username is enforced by the database constraints;
// violations surface here as sqlx errors and are translated to conflicts by
// the AppError conversion.
impl User {
    /// Insert a new user with an already-hashed password.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        phone_number: &str,
        role: Role,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, phone_number, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, phone_number, role, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(phone_number)
        .bind(role)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, phone_number, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, phone_number, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Update profile fields. Phone number and role keep their stored values
    /// when not supplied. Returns None when the id matches no row.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        username: &str,
        email: &str,
        phone_number: Option<&str>,
        role: Option<Role>,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2,
                email = $3,
                phone_number = COALESCE($4, phone_number),
                role = COALESCE($5, role)
            WHERE id = $1
            RETURNING id, username, email, password_hash, phone_number, role, created_at
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(phone_number)
        .bind(role)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Permanently remove a user. Returns false when nothing was deleted.
    pub async fn delete(db: &PgPool, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

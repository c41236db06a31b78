//! User repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::SplitmateError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, SplitmateError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (phone, name, email, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, phone, name, email, avatar_url, created_at, updated_at
            "#,
        )
        .bind(request.phone)
        .bind(request.name)
        .bind(request.email)
        .bind(request.avatar_url)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, SplitmateError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, phone, name, email, avatar_url, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by phone number
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, SplitmateError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, phone, name, email, avatar_url, created_at, updated_at FROM users WHERE phone = $1",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user profile fields
    pub async fn update(
        &self,
        id: i64,
        request: UpdateUserRequest,
    ) -> Result<User, SplitmateError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = $5
            WHERE id = $1
            RETURNING id, phone, name, email, avatar_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.avatar_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check which of the given user IDs exist
    pub async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, SplitmateError> {
        let found: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(found.into_iter().map(|(id,)| id).collect())
    }

    /// List users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, SplitmateError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, phone, name, email, avatar_url, created_at, updated_at FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, SplitmateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

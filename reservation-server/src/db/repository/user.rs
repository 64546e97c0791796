//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserRole};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, hash_pass, phone, role FROM app_user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, hash_pass, phone, role FROM app_user WHERE email = ? LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Create a new user (the caller hashes the password)
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    hash_pass: &str,
    phone: Option<&str>,
    role: UserRole,
) -> RepoResult<User> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(RepoError::Validation("Name and email are required".into()));
    }
    if find_by_email(pool, email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Email '{}' is already registered",
            email
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO app_user (name, email, hash_pass, phone, role) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(hash_pass)
    .bind(phone)
    .bind(role)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

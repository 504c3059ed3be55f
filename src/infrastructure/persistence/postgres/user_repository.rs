use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  first_name: String,
  last_name: String,
  is_active: bool,
  email_verified: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  last_login_at: Option<DateTime<Utc>>,
  locked_until: Option<DateTime<Utc>>,
  failed_login_attempts: i32,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.email,
      row.password_hash,
      row.first_name,
      row.last_name,
      row.is_active,
      row.email_verified,
      row.created_at,
      row.updated_at,
      row.last_login_at,
      row.locked_until,
      row.failed_login_attempts.max(0) as u32,
    )
  }
}

const USER_COLUMNS: &str = r#"
    id,
    email,
    password_hash,
    first_name,
    last_name,
    is_active,
    email_verified,
    created_at,
    updated_at,
    last_login_at,
    locked_until,
    failed_login_attempts
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: &User) -> Result<(), AuthError> {
    let result = sqlx::query(
      r#"
            INSERT INTO users (
                id,
                email,
                password_hash,
                first_name,
                last_name,
                is_active,
                email_verified,
                created_at,
                updated_at,
                last_login_at,
                locked_until,
                failed_login_attempts
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
    )
    .bind(user.id)
    .bind(user.email_str())
    .bind(user.password.value())
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.is_active)
    .bind(user.email_verified)
    .bind(user.created_at)
    .bind(user.updated_at)
    .bind(user.last_login_at)
    .bind(user.locked_until)
    .bind(user.failed_login_attempts as i32)
    .execute(&self.pool)
    .await;

    match result {
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
        AuthError::Repository(RepositoryError::DuplicateKey(user.email_str().to_string())),
      ),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#,
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#,
    ))
    .bind(email)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn update(&self, user: &User) -> Result<(), AuthError> {
    let result = sqlx::query(
      r#"
            UPDATE users
            SET
                email = $2,
                password_hash = $3,
                first_name = $4,
                last_name = $5,
                is_active = $6,
                email_verified = $7,
                updated_at = $8,
                last_login_at = $9,
                locked_until = $10,
                failed_login_attempts = $11
            WHERE id = $1
            "#,
    )
    .bind(user.id)
    .bind(user.email_str())
    .bind(user.password.value())
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.is_active)
    .bind(user.email_verified)
    .bind(user.updated_at)
    .bind(user.last_login_at)
    .bind(user.locked_until)
    .bind(user.failed_login_attempts as i32)
    .execute(&self.pool)
    .await;

    match result {
      Ok(result) if result.rows_affected() == 0 => {
        Err(AuthError::Repository(RepositoryError::NotFound))
      }
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
        AuthError::Repository(RepositoryError::DuplicateKey(user.email_str().to_string())),
      ),
      Err(e) => Err(e.into()),
    }
  }

  async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError> {
    let exists: bool =
      sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)"#)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

    Ok(exists)
  }
}

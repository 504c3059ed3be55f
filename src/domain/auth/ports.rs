use async_trait::async_trait;
use uuid::Uuid;

use super::entities::User;
use super::errors::AuthError;

/// Repository trait for user persistence operations.
///
/// Email lookups take the raw string: login must not distinguish a
/// malformed address from an unknown one, so no validation happens on
/// this path.
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user
  async fn create(&self, user: &User) -> Result<(), AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

  /// Updates an existing user
  async fn update(&self, user: &User) -> Result<(), AuthError>;

  /// Checks whether a user with the given email exists
  async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError>;
}

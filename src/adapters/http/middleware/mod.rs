pub mod auth;

pub use auth::{AuthMiddleware, AuthUser, AuthenticatedUser};

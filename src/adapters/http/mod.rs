pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
  UserProfileResponse, ValidateTokenRequest, ValidateTokenResponse,
};
pub use errors::{ApiError, AuthErrorKind};
pub use handlers::auth::{login_handler, register_handler, validate_token_handler};
pub use handlers::users::get_profile_handler;
pub use middleware::{AuthMiddleware, AuthUser, AuthenticatedUser};
pub use routes::{configure_auth_routes, configure_user_routes};

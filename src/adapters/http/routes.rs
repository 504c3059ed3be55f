use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  GetUserProfileUseCase, LoginUserUseCase, RegisterUserUseCase, ValidateTokenUseCase,
};

use super::handlers::auth::{login_handler, register_handler, validate_token_handler};
use super::handlers::users::get_profile_handler;

/// Configure authentication routes
///
/// Mounts all authentication-related endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api/v1/auth).
///
/// # Routes
///
/// - POST /register - Register a new user account
/// - POST /login - Authenticate and receive a token
/// - POST /validate - Check a token presented by a client or peer service
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  validate_use_case: Arc<ValidateTokenUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(validate_use_case))
    // Configure routes
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/validate", web::post().to(validate_token_handler));
}

/// Configure user routes
///
/// These routes expect the scope to be wrapped with `AuthMiddleware`.
///
/// # Routes
///
/// - GET /me - Get the authenticated user's profile
pub fn configure_user_routes(
  cfg: &mut web::ServiceConfig,
  get_profile_use_case: Arc<GetUserProfileUseCase>,
) {
  cfg
    .app_data(web::Data::new(get_profile_use_case))
    .route("/me", web::get().to(get_profile_handler));
}

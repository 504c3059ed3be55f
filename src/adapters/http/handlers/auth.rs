use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ValidateTokenRequest,
    ValidateTokenResponse,
  },
  errors::ApiError,
};
use crate::application::auth::{
  LoginUserCommand, LoginUserResponse as UseCaseLoginResponse, LoginUserUseCase,
  RegisterUserCommand, RegisterUserResponse as UseCaseRegisterResponse, RegisterUserUseCase,
  ValidateTokenUseCase,
};

/// Handler for user registration
///
/// POST /api/v1/auth/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = RegisterUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
    first_name: request.first_name.clone(),
    last_name: request.last_name.clone(),
  };

  let response: UseCaseRegisterResponse = use_case.execute(command).await?;

  let api_response = RegisterResponse {
    user_id: response.user_id,
    email: response.email,
    first_name: response.first_name,
    last_name: response.last_name,
    created_at: response.created_at,
  };

  Ok(HttpResponse::Created().json(api_response))
}

/// Handler for user login
///
/// POST /api/v1/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let response: UseCaseLoginResponse = use_case.execute(command).await?;

  let api_response = LoginResponse {
    user_id: response.user_id,
    email: response.email,
    first_name: response.first_name,
    last_name: response.last_name,
    email_verified: response.email_verified,
    token: response.token,
  };

  Ok(HttpResponse::Ok().json(api_response))
}

/// Handler for token validation
///
/// POST /api/v1/auth/validate
/// Body: ValidateTokenRequest (JSON)
/// Response: ValidateTokenResponse (JSON) with status 200
///
/// An invalid token is a successful validation with `valid: false`, not an
/// error status; peer services poll this endpoint to check tokens they hold.
pub async fn validate_token_handler(
  request: web::Json<ValidateTokenRequest>,
  use_case: web::Data<Arc<ValidateTokenUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case.execute(&request.token);

  let api_response = ValidateTokenResponse {
    valid: response.valid,
    user_id: response.user_id,
    email: response.email,
  };

  Ok(HttpResponse::Ok().json(api_response))
}

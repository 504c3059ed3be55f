use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::{
  dtos::UserProfileResponse, errors::ApiError, middleware::AuthUser,
};
use crate::application::auth::GetUserProfileUseCase;

/// Handler for getting the authenticated user's profile
///
/// GET /api/v1/users/me
/// Headers: Authorization: Bearer <token>
/// Response: UserProfileResponse (JSON) with status 200
pub async fn get_profile_handler(
  use_case: web::Data<Arc<GetUserProfileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.authenticated_user();

  let response = use_case.execute(identity.user_id).await?;

  let api_response = UserProfileResponse {
    user_id: response.user_id,
    email: response.email,
    first_name: response.first_name,
    last_name: response.last_name,
    is_active: response.is_active,
    email_verified: response.email_verified,
    created_at: response.created_at,
    last_login_at: response.last_login_at,
  };

  Ok(HttpResponse::Ok().json(api_response))
}

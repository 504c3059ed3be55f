use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};
use uuid::Uuid;

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::auth::services::AuthService,
};

/// Identity extracted from a validated token and attached to the request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
  pub email: String,
}

/// Authentication middleware that validates bearer tokens and attaches the
/// caller's identity to the request
///
/// This middleware:
/// 1. Extracts the token from the Authorization header
/// 2. Verifies the signature, expiry, and algorithm via AuthService
/// 3. Attaches AuthenticatedUser to request extensions for downstream handlers
/// 4. Returns 401 Unauthorized if the token is missing or invalid
pub struct AuthMiddleware {
  auth_service: Arc<AuthService>,
}

impl AuthMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let auth_service = self.auth_service.clone();

    Box::pin(async move {
      let token = match extract_bearer_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = HttpResponse::Unauthorized().json(e).map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let claims = match auth_service.validate_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
          tracing::debug!(error = %e, "rejected request with invalid token");
          let (request, _) = req.into_parts();
          let api_error = ApiError::Auth(AuthErrorKind::InvalidToken);
          let response = HttpResponse::Unauthorized()
            .json(api_error)
            .map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      // The subject must be a UUID; anything else is a token this service
      // did not mint for a user.
      let user_id = match Uuid::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => {
          let (request, _) = req.into_parts();
          let api_error = ApiError::Auth(AuthErrorKind::InvalidToken);
          let response = HttpResponse::Unauthorized()
            .json(api_error)
            .map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
      });

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Extension trait to extract the authenticated identity from a request
pub trait AuthUser {
  /// Get the authenticated user from request extensions
  ///
  /// # Panics
  ///
  /// Panics if the identity is not present in extensions.
  /// This should only be called in handlers that are protected by AuthMiddleware.
  fn authenticated_user(&self) -> AuthenticatedUser;
}

impl AuthUser for actix_web::HttpRequest {
  fn authenticated_user(&self) -> AuthenticatedUser {
    self
      .extensions()
      .get::<AuthenticatedUser>()
      .cloned()
      .expect("AuthenticatedUser not found in request extensions. Did you forget to add AuthMiddleware?")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_bearer_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_bearer_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_bearer_token_missing() {
    let req = TestRequest::default().to_srv_request();

    let result = extract_bearer_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_bearer_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();

    let result = extract_bearer_token(&req);
    assert!(result.is_err());
  }
}

//! Authentication use cases
//!
//! This module contains all authentication-related use cases that orchestrate
//! domain services to implement application-specific workflows.

mod get_user_profile;
mod login_user;
mod register_user;
mod validate_token;

pub use get_user_profile::{GetUserProfileUseCase, UserProfileResponse};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use validate_token::{ValidateTokenResponse, ValidateTokenUseCase};

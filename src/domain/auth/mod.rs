pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod token;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{LOCKOUT_DURATION_MINUTES, MAX_FAILED_LOGIN_ATTEMPTS, User};
pub use errors::{AuthError, HashError, RepositoryError, TokenError, ValidationError};
pub use ports::UserRepository;
pub use services::AuthService;
pub use token::{Claims, TokenService};
pub use value_objects::{Email, Password, PasswordPolicy};

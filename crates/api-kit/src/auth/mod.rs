//! JWT bearer authentication.
//!
//! The kit only issues and checks tokens; who gets a token is up to
//! the application.

mod middleware;
mod token;

pub use middleware::{require_bearer, CurrentUser};
pub use token::{Authenticator, Claims, SigningConfigurations, TokenResponse, TokenService};

#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenService;

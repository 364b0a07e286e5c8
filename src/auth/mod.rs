//! Authentication module.
//!
//! This module provides password hashing, account registration, session
//! issuance, and the write authorization policy.

mod password;
pub mod policy;
mod registration;
mod session;
pub mod validation;

pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use policy::{can_modify_post, can_post_to_board, require_admin, Identity, PolicyError};
pub use registration::{register, register_admin, RegistrationError, RegistrationRequest};
pub use session::{JwtClaims, SessionError, SessionIssuer, SESSION_TTL_SECS};
pub use validation::ValidationError;

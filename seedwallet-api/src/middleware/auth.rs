//! Password hashing for login
//!
//! bcrypt is deliberately slow, so hashing and verification run on the
//! blocking thread pool instead of stalling the async runtime.

use bcrypt::{hash, verify};

use crate::error::ServiceError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password hashing utilities
pub struct PasswordUtils;

impl PasswordUtils {
    pub async fn hash_password(password: &str, cost: u32) -> Result<String, ServiceError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ServiceError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))
    }

    pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, ServiceError> {
        let password = password.to_string();
        let hashed = hashed.to_string();
        tokio::task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|e| ServiceError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| ServiceError::Internal(format!("Failed to verify password: {}", e)))
    }

    /// Check a registration password and its confirmation
    pub fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), ServiceError> {
        if password != confirm_password {
            return Err(ServiceError::BadRequest("Passwords do not match".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::BadRequest(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

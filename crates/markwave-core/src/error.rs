//! Centralized error types for Markwave.

use thiserror::Error;

/// Main error type for Markwave operations.
#[derive(Error, Debug)]
pub enum MarkwaveError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid referral type: '{0}' (expected 'new_referral' or 'existing_customer')")]
    InvalidReferralType(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Verification rejected for {0}: unknown user, not a new referral, or already verified")]
    VerificationRejected(String),

    #[error("Graph store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Result type for Markwave operations.
pub type MarkwaveResult<T> = Result<T, MarkwaveError>;

impl MarkwaveError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

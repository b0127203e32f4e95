//! Route handlers.

pub mod health;
pub mod purchases;
pub mod users;

use axum::http::StatusCode;
use markwave_core::MarkwaveError;

/// Map a service failure to an HTTP status and message.
pub(crate) fn error_status(err: MarkwaveError) -> (StatusCode, String) {
    let status = match &err {
        MarkwaveError::Validation(_) | MarkwaveError::InvalidReferralType(_) => {
            StatusCode::BAD_REQUEST
        }
        MarkwaveError::UserNotFound(_) => StatusCode::NOT_FOUND,
        MarkwaveError::VerificationRejected(_) => StatusCode::CONFLICT,
        MarkwaveError::Store(_) => {
            tracing::error!(error = %err, "graph store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

/// Reject a payload whose required field is absent with a 400, rather than
/// letting the extractor's generic rejection leak through.
pub(crate) fn require<'a>(
    value: Option<&'a str>,
    field: &str,
) -> Result<&'a str, (StatusCode, String)> {
    value.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("Validation error: missing required field '{field}'"),
        )
    })
}

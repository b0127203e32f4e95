//! Purchase service: records a purchase against an existing user.

pub mod model;

use uuid::Uuid;

use crate::error::{MarkwaveError, MarkwaveResult};
use crate::store::ReferralStore;

pub use model::{NewPurchase, Purchase};

/// Record a purchase for the user with this mobile number.
///
/// The user must already exist; an unknown mobile fails with `UserNotFound`
/// and no Purchase node is created. When the caller supplies no `id`, a
/// UUID v4 is generated. The id is an opaque token either way.
pub async fn record(
    store: &dyn ReferralStore,
    mobile: &str,
    id: Option<String>,
    item: Option<String>,
    details: Option<String>,
) -> MarkwaveResult<Purchase> {
    if mobile.trim().is_empty() {
        return Err(MarkwaveError::validation("mobile must not be empty"));
    }

    let purchase = NewPurchase {
        id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        item,
        details,
    };

    match store.record_purchase(mobile, &purchase).await? {
        Some(created) => {
            tracing::debug!(mobile, purchase_id = %created.id, "purchase recorded");
            Ok(created)
        }
        None => Err(MarkwaveError::UserNotFound(mobile.to_string())),
    }
}

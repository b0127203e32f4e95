//! User service: referral submission, classified listings, verification.

pub mod model;

use rand::Rng;

use crate::error::{MarkwaveError, MarkwaveResult};
use crate::store::ReferralStore;

pub use model::{DeviceInfo, ReferralType, User};

/// Create or update a user keyed on `mobile`.
///
/// `name` and `referral_type` are overwritten on repeat submission; the
/// record is never duplicated. Upsert atomicity is the store's.
pub async fn create_or_update(
    store: &dyn ReferralStore,
    mobile: &str,
    name: &str,
    referral_type: &str,
) -> MarkwaveResult<User> {
    if mobile.trim().is_empty() {
        return Err(MarkwaveError::validation("mobile must not be empty"));
    }
    let referral_type = ReferralType::parse(referral_type)?;

    let user = store.upsert_user(mobile, name, referral_type).await?;
    tracing::debug!(mobile = %user.mobile, referral_type = user.referral_type.as_str(), "user upserted");
    Ok(user)
}

/// All users currently classified as `new_referral`.
pub async fn referrals(store: &dyn ReferralStore) -> MarkwaveResult<Vec<User>> {
    store.list_users_by_type(ReferralType::NewReferral).await
}

/// All users currently classified as `existing_customer`.
pub async fn customers(store: &dyn ReferralStore) -> MarkwaveResult<Vec<User>> {
    store.list_users_by_type(ReferralType::ExistingCustomer).await
}

/// Verify a referral: only an unverified `new_referral` is eligible. Stores
/// the device info, flips `verified`, and returns a one-time passcode for the
/// caller to deliver out of band.
pub async fn verify(
    store: &dyn ReferralStore,
    mobile: &str,
    device: &DeviceInfo,
) -> MarkwaveResult<String> {
    if mobile.trim().is_empty() {
        return Err(MarkwaveError::validation("mobile must not be empty"));
    }

    match store.mark_verified(mobile, device).await? {
        Some(user) => {
            tracing::info!(mobile = %user.mobile, "referral verified");
            Ok(generate_otp())
        }
        None => Err(MarkwaveError::VerificationRejected(mobile.to_string())),
    }
}

/// Six-digit one-time passcode.
fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    code.to_string()
}

//! Persistence seam between services and the graph store.
//!
//! Every mutation is a single store-side operation (merge or conditional
//! write), never a read-then-write sequence, so two concurrent submissions
//! for the same mobile cannot race into duplicate nodes or partial updates.

pub mod memory;

use async_trait::async_trait;

use crate::error::MarkwaveResult;
use crate::purchase::model::{NewPurchase, Purchase};
use crate::user::model::{DeviceInfo, ReferralType, User};

pub use memory::MemoryStore;

/// Gateway over User and Purchase entities and their `PURCHASED` relationship.
///
/// Implemented by the Neo4j-backed store and by [`MemoryStore`] for tests.
#[async_trait]
pub trait ReferralStore: Send + Sync {
    /// Create the user if absent (matched solely on `mobile`), otherwise
    /// overwrite `name` and `referral_type`. `verified` defaults to false on
    /// create and is untouched on update. Returns the resulting record.
    async fn upsert_user(
        &self,
        mobile: &str,
        name: &str,
        referral_type: ReferralType,
    ) -> MarkwaveResult<User>;

    /// All users whose classification equals `referral_type`.
    async fn list_users_by_type(&self, referral_type: ReferralType) -> MarkwaveResult<Vec<User>>;

    /// Create a Purchase node and a `PURCHASED` edge from the user with this
    /// mobile. Returns `None` without writing anything when no such user
    /// exists.
    async fn record_purchase(
        &self,
        mobile: &str,
        purchase: &NewPurchase,
    ) -> MarkwaveResult<Option<Purchase>>;

    /// Conditionally flag an unverified `new_referral` as verified, storing
    /// the device info. Returns `None` when the user is missing or not
    /// eligible; no state changes in that case.
    async fn mark_verified(
        &self,
        mobile: &str,
        device: &DeviceInfo,
    ) -> MarkwaveResult<Option<User>>;
}

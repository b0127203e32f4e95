//! In-memory [`ReferralStore`] used by unit and router tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::MarkwaveResult;
use crate::purchase::model::{NewPurchase, Purchase};
use crate::user::model::{DeviceInfo, ReferralType, User};

use super::ReferralStore;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    device: Option<DeviceInfo>,
}

#[derive(Debug, Clone)]
struct OwnedPurchase {
    owner_mobile: String,
    purchase: Purchase,
}

/// A `ReferralStore` backed by process memory. Mutations hold one lock for
/// their whole duration, mirroring the single-statement atomicity the Neo4j
/// store gets from `MERGE` and conditional `MATCH ... SET`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<String, StoredUser>,
    purchases: Vec<OwnedPurchase>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mobile of the user owning this purchase, if any.
    pub fn owner_of(&self, purchase_id: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .purchases
            .iter()
            .find(|p| p.purchase.id == purchase_id)
            .map(|p| p.owner_mobile.clone())
    }

    /// Total number of recorded purchases.
    pub fn purchase_count(&self) -> usize {
        self.inner.lock().unwrap().purchases.len()
    }

    /// Device info stored for a user, if verification has run.
    pub fn device_for(&self, mobile: &str) -> Option<DeviceInfo> {
        let inner = self.inner.lock().unwrap();
        inner.users.get(mobile).and_then(|s| s.device.clone())
    }
}

#[async_trait]
impl ReferralStore for MemoryStore {
    async fn upsert_user(
        &self,
        mobile: &str,
        name: &str,
        referral_type: ReferralType,
    ) -> MarkwaveResult<User> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner
            .users
            .entry(mobile.to_string())
            .or_insert_with(|| StoredUser {
                user: User {
                    mobile: mobile.to_string(),
                    name: name.to_string(),
                    referral_type,
                    verified: false,
                },
                device: None,
            });
        entry.user.name = name.to_string();
        entry.user.referral_type = referral_type;
        Ok(entry.user.clone())
    }

    async fn list_users_by_type(&self, referral_type: ReferralType) -> MarkwaveResult<Vec<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .filter(|s| s.user.referral_type == referral_type)
            .map(|s| s.user.clone())
            .collect())
    }

    async fn record_purchase(
        &self,
        mobile: &str,
        purchase: &NewPurchase,
    ) -> MarkwaveResult<Option<Purchase>> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.users.contains_key(mobile) {
            return Ok(None);
        }
        let created = Purchase {
            id: purchase.id.clone(),
        };
        inner.purchases.push(OwnedPurchase {
            owner_mobile: mobile.to_string(),
            purchase: created.clone(),
        });
        Ok(Some(created))
    }

    async fn mark_verified(
        &self,
        mobile: &str,
        device: &DeviceInfo,
    ) -> MarkwaveResult<Option<User>> {
        let mut inner = self.inner.lock().unwrap();
        match inner.users.get_mut(mobile) {
            Some(stored)
                if stored.user.referral_type == ReferralType::NewReferral
                    && !stored.user.verified =>
            {
                stored.user.verified = true;
                stored.device = Some(device.clone());
                Ok(Some(stored.user.clone()))
            }
            _ => Ok(None),
        }
    }
}

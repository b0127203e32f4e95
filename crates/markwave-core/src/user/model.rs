//! User domain models.

use serde::{Deserialize, Serialize};

use crate::error::{MarkwaveError, MarkwaveResult};

/// A referred user, keyed by mobile number.
///
/// `device_id` / `device_model` are written by the verification workflow and
/// deliberately absent here: listing responses expose only these four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub mobile: String,
    pub name: String,
    pub referral_type: ReferralType,
    pub verified: bool,
}

/// Referral classification. Flat, last-write-wins: any submission may flip a
/// customer back to a referral and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralType {
    NewReferral,
    ExistingCustomer,
}

impl ReferralType {
    /// Parse from the wire representation.
    pub fn parse(s: &str) -> MarkwaveResult<Self> {
        match s {
            "new_referral" => Ok(Self::NewReferral),
            "existing_customer" => Ok(Self::ExistingCustomer),
            other => Err(MarkwaveError::InvalidReferralType(other.to_string())),
        }
    }

    /// Convert to the wire/store representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewReferral => "new_referral",
            Self::ExistingCustomer => "existing_customer",
        }
    }
}

/// Device details captured when a referral is verified.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub device_id: String,
    pub device_model: String,
}

//! Markwave Core Library
//!
//! Domain models and business logic for the Markwave referral backend.

pub mod error;
pub mod purchase;
pub mod store;
pub mod user;

pub use error::{MarkwaveError, MarkwaveResult};
pub use store::ReferralStore;

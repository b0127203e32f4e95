//! Purchase domain models.

use serde::{Deserialize, Serialize};

/// A recorded purchase. Immutable once created; ownership is carried by the
/// `PURCHASED` edge in the store, not duplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
}

/// Input for creating a purchase. `item` / `details` are stored as properties
/// on the `PURCHASED` edge when present.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub id: String,
    pub item: Option<String>,
    pub details: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signup address carried on the user profile, when one exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileAddress {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Delivery details of a past order. Sources hand these back most recent
/// first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PastDelivery {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AddressOrigin {
    Profile,
    History,
}

/// A deduplicated, selectable delivery point. Recomputed per checkout
/// session; never persisted as its own record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SavedAddress {
    pub id: usize,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub origin: AddressOrigin,
}

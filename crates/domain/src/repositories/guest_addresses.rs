use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::value_objects::saved_addresses::PastDelivery;

/// Device-local stand-in for order history when there is no signed-in user.
/// Entries never leave the serving process.
#[async_trait]
#[automock]
pub trait GuestAddressStore {
    async fn list_for_device(&self, device_key: &str) -> Result<Vec<PastDelivery>>;

    async fn upsert_for_device(&self, device_key: &str, entry: PastDelivery) -> Result<()>;
}

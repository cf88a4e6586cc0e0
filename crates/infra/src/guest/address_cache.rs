use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use domain::{
    repositories::guest_addresses::GuestAddressStore,
    value_objects::saved_addresses::PastDelivery,
};

/// In-memory, device-keyed address cache for guest checkouts. Entries never
/// leave the serving process and vanish on restart.
#[derive(Default)]
pub struct GuestAddressCache {
    entries: Mutex<HashMap<String, Vec<PastDelivery>>>,
}

impl GuestAddressCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestAddressStore for GuestAddressCache {
    async fn list_for_device(&self, device_key: &str) -> Result<Vec<PastDelivery>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(device_key).cloned().unwrap_or_default())
    }

    async fn upsert_for_device(&self, device_key: &str, entry: PastDelivery) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let device_entries = entries.entry(device_key.to_string()).or_default();

        // The address string is the identity of a delivery point.
        device_entries.retain(|existing| existing.address != entry.address);
        device_entries.insert(0, entry);

        Ok(())
    }
}

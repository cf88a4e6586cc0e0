use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::value_objects::saved_addresses::PastDelivery;

/// Past delivery details of a returning customer, most recent first.
#[async_trait]
#[automock]
pub trait AddressHistorySource {
    async fn list_past_orders(&self, user_id: Uuid) -> Result<Vec<PastDelivery>>;
}

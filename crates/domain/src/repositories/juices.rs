use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::juices::JuiceEntity;

#[async_trait]
#[automock]
pub trait JuiceRepository {
    async fn list_juices(&self) -> Result<Vec<JuiceEntity>>;
}

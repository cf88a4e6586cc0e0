use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};
use crate::value_objects::enums::subscription_statuses::SubscriptionStatus;

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn create(&self, insert_subscription: InsertSubscriptionEntity)
    -> Result<SubscriptionEntity>;

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SubscriptionEntity>>;

    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>>;

    async fn update_status(
        &self,
        subscription_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<()>;
}

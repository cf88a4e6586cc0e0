use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        juices::JuiceModel,
        subscriptions::{AdminOverviewDto, JuicePopularityDto},
    },
};

/// Aggregates every subscription into the storefront dashboard numbers.
/// Customers are counted by distinct phone number; variety subscriptions
/// carry no juice and stay out of the popularity ranking.
pub struct AdminOverviewUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
}

impl<S> AdminOverviewUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>) -> Self {
        Self { subscription_repo }
    }

    pub async fn overview(&self, juices: &[JuiceModel]) -> Result<AdminOverviewDto> {
        let subscriptions = self.subscription_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "admin_overview: failed to list subscriptions");
            err
        })?;

        let total_revenue: i64 = subscriptions
            .iter()
            .map(|subscription| i64::from(subscription.total))
            .sum();
        let active_subscriptions = subscriptions
            .iter()
            .filter(|subscription| subscription.status == SubscriptionStatus::Active.as_str())
            .count();
        let total_customers = subscriptions
            .iter()
            .map(|subscription| subscription.customer_phone.as_str())
            .collect::<HashSet<_>>()
            .len();
        let average_order_value = if subscriptions.is_empty() {
            0
        } else {
            (total_revenue as f64 / subscriptions.len() as f64).round() as i64
        };

        let mut juice_popularity: Vec<JuicePopularityDto> = juices
            .iter()
            .map(|juice| JuicePopularityDto {
                juice_id: juice.id,
                name: juice.name.clone(),
                count: subscriptions
                    .iter()
                    .filter(|subscription| subscription.juice_id == Some(juice.id))
                    .count(),
            })
            .collect();
        juice_popularity.sort_by(|a, b| b.count.cmp(&a.count));

        info!(
            subscription_count = subscriptions.len(),
            total_revenue, "admin_overview: computed"
        );

        Ok(AdminOverviewDto {
            total_revenue,
            active_subscriptions,
            total_customers,
            average_order_value,
            juice_popularity,
        })
    }
}

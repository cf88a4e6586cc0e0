use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::subscriptions::SubscriptionEntity;
use crate::value_objects::enums::{
    delivery_slots::DeliverySlot, subscription_statuses::SubscriptionStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub juice_id: Option<i32>,
    pub plan_id: String,
    pub quantity: i32,
    pub delivery_slot: DeliverySlot,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub starts_on: NaiveDate,
    pub total: i32,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(value: SubscriptionEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            juice_id: value.juice_id,
            plan_id: value.plan_id,
            quantity: value.quantity,
            delivery_slot: DeliverySlot::from_str(&value.delivery_slot).unwrap_or_default(),
            customer_name: value.customer_name,
            customer_phone: value.customer_phone,
            customer_address: value.customer_address,
            starts_on: value.starts_on,
            total: value.total,
            status: SubscriptionStatus::from_str(&value.status).unwrap_or_default(),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct JuicePopularityDto {
    pub juice_id: i32,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AdminOverviewDto {
    pub total_revenue: i64,
    pub active_subscriptions: usize,
    pub total_customers: usize,
    pub average_order_value: i64,
    pub juice_popularity: Vec<JuicePopularityDto>,
}

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub juice_id: Option<i32>,
    pub plan_id: String,
    pub quantity: i32,
    pub delivery_slot: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub starts_on: NaiveDate,
    pub total: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub user_id: Option<Uuid>,
    pub juice_id: Option<i32>,
    pub plan_id: String,
    pub quantity: i32,
    pub delivery_slot: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub starts_on: NaiveDate,
    pub total: i32,
    pub status: String,
}

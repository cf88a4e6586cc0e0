use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    repositories::address_history::AddressHistorySource, schema::subscriptions,
    value_objects::saved_addresses::PastDelivery,
};

/// Order history is a projection over the subscriptions table; there is no
/// separate address table.
pub struct AddressHistoryPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AddressHistoryPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AddressHistorySource for AddressHistoryPostgres {
    async fn list_past_orders(&self, user_id: Uuid) -> Result<Vec<PastDelivery>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .order(subscriptions::created_at.desc())
            .select((
                subscriptions::customer_name,
                subscriptions::customer_phone,
                subscriptions::customer_address,
                subscriptions::created_at,
            ))
            .load::<(String, String, String, DateTime<Utc>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(name, phone, address, created_at)| PastDelivery {
                name,
                phone,
                address,
                created_at,
            })
            .collect())
    }
}

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::juices::JuiceEntity, repositories::juices::JuiceRepository, schema::juices,
};

pub struct JuicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl JuicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl JuiceRepository for JuicePostgres {
    async fn list_juices(&self) -> Result<Vec<JuiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = juices::table
            .order(juices::id.asc())
            .select(JuiceEntity::as_select())
            .load::<JuiceEntity>(&mut conn)?;

        Ok(results)
    }
}

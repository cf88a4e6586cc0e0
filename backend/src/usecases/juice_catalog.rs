use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use domain::{
    repositories::juices::JuiceRepository,
    value_objects::juices::{JuiceModel, seed_juices},
};

/// Serves the persisted catalog, falling back to the launch seed while the
/// store has no rows.
pub struct JuiceCatalogUseCase<J>
where
    J: JuiceRepository + Send + Sync + 'static,
{
    juice_repo: Arc<J>,
}

impl<J> JuiceCatalogUseCase<J>
where
    J: JuiceRepository + Send + Sync + 'static,
{
    pub fn new(juice_repo: Arc<J>) -> Self {
        Self { juice_repo }
    }

    pub async fn list_juices(&self) -> Result<Vec<JuiceModel>> {
        let juices = self.juice_repo.list_juices().await?;

        if juices.is_empty() {
            info!("juice_catalog: persisted catalog is empty, serving seed data");
            return Ok(seed_juices());
        }

        Ok(juices.into_iter().map(JuiceModel::from).collect())
    }
}

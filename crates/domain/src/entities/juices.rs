use diesel::prelude::*;

use crate::schema::juices;

/// Catalog row. Juices are reference data, seeded externally and read-only
/// to the storefront.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = juices)]
pub struct JuiceEntity {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub category: String,
    pub calories: i32,
    pub size_label: String,
}

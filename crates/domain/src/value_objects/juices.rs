use serde::{Deserialize, Serialize};

use crate::entities::juices::JuiceEntity;
use crate::value_objects::enums::juice_categories::JuiceCategory;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JuiceModel {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub category: JuiceCategory,
    pub calories: i32,
    pub size_label: String,
}

impl From<JuiceEntity> for JuiceModel {
    fn from(value: JuiceEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            category: JuiceCategory::from_str(&value.category).unwrap_or(JuiceCategory::Refresh),
            calories: value.calories,
            size_label: value.size_label,
        }
    }
}

fn juice(
    id: i32,
    name: &str,
    description: &str,
    price: i32,
    category: JuiceCategory,
    calories: i32,
) -> JuiceModel {
    JuiceModel {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        calories,
        size_label: "500ml".to_string(),
    }
}

/// Launch catalog, served whenever the persisted catalog has no rows yet.
pub fn seed_juices() -> Vec<JuiceModel> {
    vec![
        juice(
            1,
            "Green Goddess",
            "Spinach, kale, apple, cucumber, lemon, ginger",
            149,
            JuiceCategory::Detox,
            120,
        ),
        juice(
            2,
            "Sunrise Boost",
            "Orange, carrot, turmeric, ginger, lemon",
            129,
            JuiceCategory::Energy,
            150,
        ),
        juice(
            3,
            "Berry Shield",
            "Blueberry, strawberry, acai, pomegranate, honey",
            179,
            JuiceCategory::Immunity,
            180,
        ),
        juice(
            4,
            "Tropical Breeze",
            "Pineapple, mango, coconut water, mint",
            139,
            JuiceCategory::Refresh,
            140,
        ),
        juice(
            5,
            "Power Punch",
            "Banana, peanut butter, oats, almond milk, honey",
            199,
            JuiceCategory::Protein,
            320,
        ),
        juice(
            6,
            "Citrus Cleanse",
            "Grapefruit, orange, lemon, lime, mint",
            119,
            JuiceCategory::Detox,
            95,
        ),
    ]
}

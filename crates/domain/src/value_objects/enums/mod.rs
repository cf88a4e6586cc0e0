pub mod delivery_slots;
pub mod juice_categories;
pub mod plan_durations;
pub mod plan_types;
pub mod subscription_statuses;

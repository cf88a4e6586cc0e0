pub mod address_history;
pub mod juices;
pub mod subscriptions;

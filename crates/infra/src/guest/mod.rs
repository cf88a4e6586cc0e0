pub mod address_cache;

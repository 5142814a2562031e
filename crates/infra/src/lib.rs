//! Infrastructure layer: storage adapters, configuration and the inventory service.

pub mod config;
pub mod service;
pub mod store;


pub use config::{ConfigError, InventoryConfig};
pub use service::InventoryService;
pub use store::InMemoryInventoryStore;

pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryIntegrationStore;
pub use repository::PgIntegrationStore;
pub use store::IntegrationStore;

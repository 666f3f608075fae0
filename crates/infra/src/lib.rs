//! Infrastructure layer: storage sinks, configuration, and the seeding service.

pub mod config;
pub mod seeder;
pub mod store;


pub use config::{FailurePolicy, SeederConfig};
pub use seeder::{InventorySeeder, SeedReport, SeederError, SkippedItem};
pub use store::{InMemoryInventorySink, InventorySink, PostgresInventorySink, StoreError};

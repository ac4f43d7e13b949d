pub mod manager;
pub mod models;
pub mod pg_store;
pub mod query_builder;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use pg_store::PgAreaStore;
pub use store::AreaStore;

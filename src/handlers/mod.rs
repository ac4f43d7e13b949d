// handlers/mod.rs - one module per public route
pub mod area;
pub mod health;
pub mod root;
pub mod years;

pub use area::get as area_get;
pub use health::get as health_get;
pub use root::get as root_get;
pub use years::get as years_get;

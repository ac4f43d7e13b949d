//! Request validation and response shaping for the HTTP layer.

pub mod format;
pub mod params;

pub use params::{AreaParams, AreaRequest, FieldError};

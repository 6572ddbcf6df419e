//! Data models for the property service
//!
//! The persisted `Property` record and the DTOs serialized in HTTP responses.

pub mod property;
pub mod responses;

// Re-export commonly used types
pub use property::{NewProperty, Property};
pub use responses::{HealthResponse, PropertyListItem, PropertyListResponse};

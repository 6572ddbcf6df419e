//! API Module
//!
//! HTTP handlers, page caching and routing for the property service.
//!
//! # Endpoints
//! - `GET /properties/` - All properties as `{"data": [...]}`
//! - `GET /cache/metrics` - Cache hit/miss metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod page_cache;
pub mod routes;

pub use handlers::*;
pub use page_cache::{page_cache, page_cache_key, page_key, PAGE_TTL};
pub use routes::create_router;

//! API Module
//!
//! HTTP handlers and routing that expose a cache over REST.
//!
//! # Endpoints
//! - `PUT /entries/*key` - Cache the raw request body under a key
//! - `GET /entries/*key` - Read cached bytes by key
//! - `GET /fetch?url=...` - Fetch-through: serve from cache or go upstream
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! API Module
//!
//! HTTP handlers and routing for the settings REST API.
//!
//! # Endpoints
//! - `GET|POST /settings` - List all / add a setting
//! - `GET|PUT|DELETE /settings/:key` - Resolve / set / delete a setting
//! - `PUT /settings/:key/temp` - Cache-only override
//! - `GET /settings/:key/options` - Resolved select options
//! - `DELETE /cache[/:key]` - Explicit cache invalidation
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

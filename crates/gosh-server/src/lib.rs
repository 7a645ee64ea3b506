//! HTTP and WebSocket server for the gosh program catalog.
//!
//! Clients create and fetch programs over a JSON API and search them either
//! per request (`GET /api/program?q=`) or over a persistent WebSocket
//! (`/ws`). Both transports share one [`search::SearchService`].

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod search;
pub mod state;
pub mod stream;

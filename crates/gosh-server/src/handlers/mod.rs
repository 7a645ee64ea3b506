//! HTTP handler modules for the request/response API.
//!
//! Handlers are thin: they parse the request, lock the store or call
//! [`SearchService`](crate::search::SearchService), and shape the JSON reply.

pub mod health;
pub mod programs;

//! API schema types for request/response definitions.
//!
//! Each sub-module defines the payload types for one surface. Types use serde
//! derives for JSON serialization/deserialization.

pub mod common;
pub mod programs;
pub mod stream;

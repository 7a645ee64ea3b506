//! Frame payloads for the WebSocket search stream.

use gosh_storage::Program;
use serde::{Deserialize, Serialize};

use super::common::null_as_default;

/// Inbound frame: `{"q": "<text>"}`. A missing or `null` `q` is empty text.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub q: String,
}

/// Outbound frame: `{"data": [...]}`. An empty result is an explicit `[]`.
#[derive(Debug, Clone, Serialize)]
pub struct StreamReply {
    pub data: Vec<Program>,
}

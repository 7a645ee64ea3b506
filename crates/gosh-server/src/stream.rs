//! WebSocket search stream.
//!
//! One connection runs one [`StreamSession`]: receive a frame, search, send
//! exactly one reply, repeat. Frames are handled strictly in arrival order.
//! A malformed frame gets an inline error reply and the session continues;
//! any transport read or write failure ends the session.

use std::time::Instant;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::error::ApiError;
use crate::schema::stream::{StreamReply, StreamRequest};
use crate::search::SearchService;
use crate::state::AppState;

/// Reply sent for a frame that isn't `{"q": "<text>"}`.
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

/// Reply sent if the result can't be encoded.
pub const ENCODE_FAILED: &str = "Unable to marshal response";

/// Upgrades the connection and hands it to a fresh [`StreamSession`].
///
/// Requests that are not WebSocket upgrades are answered with
/// `426 Upgrade Required`.
///
/// `GET /ws`
pub async fn stream_search(
    State(state): State<AppState>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, ApiError> {
    let upgrade = upgrade.map_err(|rejection| {
        tracing::debug!(%rejection, "stream endpoint called without upgrade");
        ApiError::UpgradeRequired("Upgrade required".to_string())
    })?;

    let search = state.search.clone();
    Ok(upgrade.on_upgrade(move |socket| StreamSession::open().run(socket, search)))
}

/// Per-connection state, created when the upgrade completes and dropped when
/// the connection ends.
#[derive(Debug)]
pub struct StreamSession {
    id: Uuid,
    opened_at: Instant,
    handled: u64,
}

impl StreamSession {
    pub fn open() -> Self {
        StreamSession {
            id: Uuid::new_v4(),
            opened_at: Instant::now(),
            handled: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Data frames answered so far.
    pub fn handled(&self) -> u64 {
        self.handled
    }

    /// Produces the reply text for one inbound payload.
    pub async fn respond(&mut self, payload: &[u8], search: &SearchService) -> String {
        self.handled += 1;

        let request: StreamRequest = match serde_json::from_slice(payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(session = %self.id, error = %e, "malformed stream frame");
                return INVALID_REQUEST_BODY.to_string();
            }
        };

        let reply = StreamReply {
            data: search.search(&request.q).await,
        };

        match serde_json::to_string(&reply) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "failed to encode stream reply");
                ENCODE_FAILED.to_string()
            }
        }
    }

    /// Drives the receive/search/reply loop until the peer closes or the
    /// transport fails. Replies mirror the inbound frame kind.
    pub async fn run(mut self, mut socket: WebSocket, search: SearchService) {
        tracing::info!(session = %self.id, "stream session opened");

        loop {
            let message = match socket.recv().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    tracing::warn!(session = %self.id, error = %e, "stream read failed");
                    break;
                }
                None => break,
            };

            let reply = match message {
                Message::Text(text) => {
                    Message::Text(self.respond(text.as_str().as_bytes(), &search).await.into())
                }
                Message::Binary(bytes) => {
                    Message::Binary(self.respond(&bytes, &search).await.into())
                }
                // Pings are answered by the transport.
                Message::Ping(_) | Message::Pong(_) => continue,
                Message::Close(_) => break,
            };

            if let Err(e) = socket.send(reply).await {
                tracing::warn!(session = %self.id, error = %e, "stream write failed");
                break;
            }
        }

        tracing::info!(
            session = %self.id,
            handled = self.handled,
            elapsed = ?self.opened_at.elapsed(),
            "stream session closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use gosh_storage::{InMemoryStore, ProgramStore};

    use super::*;

    fn search_over(programs: &[(&str, &str)]) -> SearchService {
        let mut store = InMemoryStore::new();
        for (name, description) in programs {
            store.create_program(name, description).unwrap();
        }
        AppState::with_store(store).search
    }

    #[tokio::test]
    async fn no_match_replies_with_empty_list() {
        let search = search_over(&[]);
        let mut session = StreamSession::open();
        let reply = session
            .respond(br#"{"q": "machine learning"}"#, &search)
            .await;
        assert_eq!(reply, r#"{"data":[]}"#);
    }

    #[tokio::test]
    async fn match_replies_with_programs() {
        let search = search_over(&[("Machine Learning", "intro")]);
        let mut session = StreamSession::open();
        let reply = session.respond(br#"{"q": "machine learning"}"#, &search).await;
        let json: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(json["data"][0]["name"], "Machine Learning");
        assert_eq!(json["data"][0]["id"], 1);
    }

    #[tokio::test]
    async fn malformed_frame_replies_with_error_text() {
        let search = search_over(&[]);
        let mut session = StreamSession::open();
        assert_eq!(session.respond(b"not json", &search).await, INVALID_REQUEST_BODY);
        assert_eq!(session.respond(br#"{"q": 5}"#, &search).await, INVALID_REQUEST_BODY);
        // The session keeps answering after a bad frame.
        assert_eq!(session.respond(br#"{"q": ""}"#, &search).await, r#"{"data":[]}"#);
        assert_eq!(session.handled(), 3);
    }

    #[tokio::test]
    async fn missing_or_null_query_is_empty_search() {
        let search = search_over(&[("Machine Learning", "intro")]);
        let mut session = StreamSession::open();
        for frame in [&b"{}"[..], br#"{"q": null}"#, br#"{"query": "machine"}"#] {
            assert_eq!(session.respond(frame, &search).await, r#"{"data":[]}"#);
        }
    }

    #[test]
    fn sessions_get_distinct_ids() {
        assert_ne!(StreamSession::open().id(), StreamSession::open().id());
    }
}

//! `WebSocket` transport for the universe stream.
//!
//! Clients connect to `GET /ws/universe`, send JSON commands such as
//! `{"type":"SUBSCRIBE"}`, and receive JSON-encoded [`UniverseState`]
//! text frames. The protocol itself lives in [`protocol`](crate::protocol);
//! this module only maps `WebSocket` frames onto [`CommandStream`].

use std::future::Future;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::debug;
use utte_types::UniverseState;

use crate::error::StreamError;
use crate::protocol::{self, CommandStream, Inbound};
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` stream.
///
/// # Route
///
/// `GET /ws/universe`
pub async fn ws_universe(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run one connection until the protocol loop ends or the process shuts
/// down.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let _guard = state.track_stream();
    debug!(open_streams = state.open_streams(), "stream client connected");

    let mut stream = WebSocketStream::new(socket);
    tokio::select! {
        result = protocol::run_stream(&mut stream, &state.updates) => match result {
            Ok(report) => debug!(sent = report.sent, "stream client disconnected"),
            Err(err) => debug!(%err, "stream terminated"),
        },
        () = state.shutdown.wait() => debug!("stream closed for shutdown"),
    }
}

/// [`CommandStream`] over an Axum [`WebSocket`].
#[derive(Debug)]
pub struct WebSocketStream {
    socket: WebSocket,
}

impl WebSocketStream {
    /// Wrap an upgraded socket.
    pub const fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

impl CommandStream for WebSocketStream {
    fn next_inbound(&mut self) -> impl Future<Output = Result<Option<Inbound>, StreamError>> + Send {
        async move {
            loop {
                match self.socket.recv().await {
                    Some(Ok(Message::Close(_))) | None => return Ok(None),
                    Some(Err(e)) => return Err(StreamError::Receive(e.to_string())),
                    Some(Ok(Message::Text(text))) => return Ok(Some(Inbound::parse(text.as_str()))),
                    Some(Ok(Message::Binary(bytes))) => {
                        let inbound = std::str::from_utf8(&bytes).map_or(Inbound::Unrecognized, Inbound::parse);
                        return Ok(Some(inbound));
                    }
                    // Control frames are not commands.
                    Some(Ok(Message::Ping(data))) => {
                        self.socket
                            .send(Message::Pong(data))
                            .await
                            .map_err(|e| StreamError::Send(e.to_string()))?;
                    }
                    Some(Ok(Message::Pong(_))) => {}
                }
            }
        }
    }

    fn send_state(&mut self, state: &UniverseState) -> impl Future<Output = Result<(), StreamError>> + Send {
        let encoded = serde_json::to_string(state);
        async move {
            let json = encoded?;
            self.socket
                .send(Message::Text(json.into()))
                .await
                .map_err(|e| StreamError::Send(e.to_string()))
        }
    }
}

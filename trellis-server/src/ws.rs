use crate::dispatcher::RelayDispatcher;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use trellis_core::{ClientMessage, ConnectionId, ServerEvent};

/// Upgrade handler for `/ws/{connection}`. The connection id comes from
/// the route path, the way the transport hands out socket ids.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(connection): Path<String>,
    State(dispatcher): State<RelayDispatcher>,
) -> impl IntoResponse {
    let Ok(connection) = connection.parse::<ConnectionId>() else {
        warn!(%connection, "rejecting upgrade with malformed connection id");
        return StatusCode::BAD_REQUEST.into_response();
    };

    ws.on_upgrade(move |socket| handle_socket(socket, connection, dispatcher))
        .into_response()
}

async fn handle_socket(socket: WebSocket, connection: ConnectionId, dispatcher: RelayDispatcher) {
    info!(%connection, "new signaling connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    dispatcher.relay().attach(connection, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize server event: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let dispatcher = dispatcher.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => dispatcher.handle(connection, message),
                        Err(e) => warn!(%connection, "invalid client message: {e}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Runs on every exit path, so an aborted reader still tears down
    // presence for this connection.
    dispatcher.handle_disconnect(connection);
    info!(%connection, "signaling connection closed");
}

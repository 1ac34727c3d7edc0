use crate::error::LinkError;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};
use trellis_core::{ClientMessage, ConnectionId, ServerEvent};

/// Live signaling connection: typed messages in both directions, JSON
/// on the wire. Dropping the outbound sender closes the socket; the
/// inbound receiver ends when the server goes away.
pub struct SignalingChannel {
    pub outbound: mpsc::UnboundedSender<ClientMessage>,
    pub inbound: mpsc::UnboundedReceiver<ServerEvent>,
}

fn endpoint(server: &str, connection: ConnectionId) -> String {
    format!("{}/ws/{connection}", server.trim_end_matches('/'))
}

/// Dials `{server}/ws/{connection}` and spawns the two pump tasks that
/// shuttle messages between the socket and the typed channels.
pub async fn connect(
    server: &str,
    connection: ConnectionId,
) -> Result<SignalingChannel, LinkError> {
    let url = endpoint(server, connection);
    let (stream, _) = connect_async(&url).await?;
    info!(%url, "signaling connected");

    let (mut write, mut read) = stream.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ClientMessage>();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<ServerEvent>();

    tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize client message: {e}");
                    continue;
                }
            };
            if write.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
        let _ = write.close().await;
    });

    tokio::spawn(async move {
        while let Some(Ok(message)) = read.next().await {
            match message {
                Message::Text(text) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(event) => {
                        if inbound_tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("invalid server event: {e}"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    Ok(SignalingChannel {
        outbound: outbound_tx,
        inbound: inbound_rx,
    })
}

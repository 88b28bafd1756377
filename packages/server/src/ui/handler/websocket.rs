//! WebSocket connection handlers.
//!
//! Each connection goes Connecting (upgrade) → Open (registered, counted,
//! broadcast) → Closed (unregistered).

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{domain::ConnectionId, ui::state::AppState};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for broadcast messages
/// * `sender` - WebSocket sink to send messages to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();

    // Start forwarding before the connection is announced so the first count is not missed
    let mut send_task = pusher_loop(rx, sender);

    match state
        .connect_visitor_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        Ok(count) => {
            tracing::info!(
                "Connection '{}' opened, visitor count is now {}",
                connection_id,
                count.value()
            );
        }
        Err(e) => {
            tracing::warn!(
                "Connection '{}' opened but visitor count was not updated: {}",
                connection_id,
                e
            );
        }
    }

    let connection_id_for_recv = connection_id.clone();

    // Incoming frames carry no meaning; only watch for close and errors
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_for_recv
                    );
                    break;
                }
                Ok(Message::Ping(_)) => {
                    tracing::debug!("Received ping");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_visitor_usecase
        .execute(&connection_id)
        .await;
    tracing::info!("Connection '{}' closed", connection_id);
}

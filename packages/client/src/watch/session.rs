//! WebSocket watch session.

use futures_util::StreamExt;
use jobrelay_server::infrastructure::dto::websocket::VisitorCountMessage;
use jobrelay_shared::time::now_local_rfc3339;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{error::ClientError, formatter::MessageFormatter};

/// Extract the count from a `visitorCount` event, if the frame is one
pub fn parse_visitor_count(text: &str) -> Option<u64> {
    serde_json::from_str::<VisitorCountMessage>(text)
        .ok()
        .map(|message| message.count)
}

/// Run one WebSocket session, printing every visitor count update
///
/// Returns `Ok(())` once `max_updates` updates have been printed, and
/// `ClientError::ConnectionError` when the connection is lost first.
pub async fn run_watch_session(url: &str, max_updates: Option<usize>) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to relay!");

    let (_write, mut read) = ws_stream.split();
    let mut updates = 0;

    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => {
                match parse_visitor_count(text.as_str()) {
                    Some(count) => {
                        println!(
                            "{}",
                            MessageFormatter::format_visitor_count(count, &now_local_rfc3339())
                        );
                        updates += 1;
                    }
                    None => println!("{}", MessageFormatter::format_raw_message(text.as_str())),
                }
                if max_updates.is_some_and(|max| updates >= max) {
                    return Ok(());
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                break;
            }
            _ => {}
        }
    }

    Err(ClientError::ConnectionError("Connection lost".to_string()))
}

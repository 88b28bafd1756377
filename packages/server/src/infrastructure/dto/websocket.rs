//! Realtime channel DTOs.

use serde::{Deserialize, Serialize};

/// Event names carried in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "visitorCount")]
    VisitorCount,
}

/// Broadcast to every open connection after each new connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorCountMessage {
    pub r#type: MessageType,
    pub count: u64,
}

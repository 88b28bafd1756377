//! Data Transfer Objects (DTOs) for the relay.
//!
//! - `http`: inbound HTTP request and response bodies
//! - `websocket`: realtime channel messages
//! - `telegram`: outbound Telegram Bot API request bodies

pub mod conversion;
pub mod http;
pub mod telegram;
pub mod websocket;

//! Job order relay library.
//!
//! Accepts job order submissions over HTTP, forwards them to the Telegram Bot
//! API, and keeps a persistent visitor counter that is broadcast to every
//! connected WebSocket client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

#[cfg(test)]
pub(crate) mod test_support;

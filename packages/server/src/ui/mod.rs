//! HTTP and WebSocket server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::PHOTO_FIELD;
pub use server::Server;

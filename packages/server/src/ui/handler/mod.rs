//! Request handlers.

mod http;
mod submission;
mod websocket;

pub use http::{health_check, visitor_count};
pub use submission::{PHOTO_FIELD, panic_response, submit_job_order};
pub use websocket::websocket_handler;

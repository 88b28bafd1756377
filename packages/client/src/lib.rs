//! Command line client for the job order relay.
//!
//! - `submit`: posts a job order (with optional photos) to the relay
//! - `watch`: follows the live visitor count over WebSocket

pub mod domain;
pub mod error;
pub mod formatter;
pub mod submit;
pub mod watch;

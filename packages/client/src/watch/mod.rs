//! Live visitor count follower.

mod runner;
mod session;

pub use runner::run_watch;
pub use session::{parse_visitor_count, run_watch_session};

//! UseCase 層
//!
//! ドメインモデルと trait を組み合わせて、1 つの操作を順序どおりに実行します。

mod connect_visitor;
mod disconnect_visitor;
mod error;
mod get_visitor_count;
mod submit_job_order;

pub use connect_visitor::ConnectVisitorUseCase;
pub use disconnect_visitor::DisconnectVisitorUseCase;
pub use error::{ConnectError, SubmitJobOrderError};
pub use get_visitor_count::GetVisitorCountUseCase;
pub use submit_job_order::SubmitJobOrderUseCase;

//! Notifier trait 定義
//!
//! 外部メッセージング API への配送のインターフェース。
//! 具体的な実装（Telegram Bot API）は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::{delivery::Delivery, error::RelayError};

/// 通知の配送先
///
/// 1 回の `deliver` は API への HTTP リクエスト 1 回に対応し、
/// 部分的な成功はありません（アルバムも全体で成功か失敗のどちらか）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 配送を実行
    ///
    /// # Errors
    ///
    /// API が成功以外を返した場合、または通信に失敗した場合 `RelayError`
    async fn deliver(&self, delivery: Delivery) -> Result<(), RelayError>;
}

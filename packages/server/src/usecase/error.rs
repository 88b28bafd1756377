//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{CounterError, RelayError};

/// ジョブオーダー送信のエラー
#[derive(Debug, Error)]
pub enum SubmitJobOrderError {
    /// メッセージング API への配送に失敗した
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// 配送タスクが異常終了した（panic など）
    #[error("delivery task failed: {0}")]
    Internal(String),
}

/// 訪問者接続のエラー
#[derive(Debug, Error)]
pub enum ConnectError {
    /// カウンタの永続化に失敗した
    #[error(transparent)]
    Counter(#[from] CounterError),

    /// 通知メッセージの生成に失敗した
    #[error("failed to encode visitor count message: {0}")]
    Encode(#[from] serde_json::Error),
}

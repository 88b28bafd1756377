//! ドメイン層のエラー型

use thiserror::Error;

/// ドメインモデルの生成・検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 添付写真の枚数が上限を超えている
    #[error("too many photos: {count} attached, at most {max} allowed")]
    TooManyAttachments { count: usize, max: usize },
}

/// メッセージング API への配送エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// API が成功以外のステータスを返した
    #[error("messaging API responded with status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// リクエストの送信自体に失敗した（接続エラーなど）
    #[error("failed to reach messaging API: {0}")]
    Transport(String),

    /// 配送の制限時間を超えた
    #[error("messaging API did not respond within the deadline")]
    Timeout,

    /// リクエストの組み立てに失敗した（不正な MIME type など）
    #[error("invalid outbound request: {0}")]
    InvalidRequest(String),
}

/// 訪問者カウンタの永続化エラー
#[derive(Debug, Error)]
pub enum CounterError {
    /// カウンタの書き込みに失敗した
    #[error("failed to persist visitor count: {0}")]
    Persist(#[from] std::io::Error),

    /// カウンタのシリアライズに失敗した
    #[error("failed to encode visitor count: {0}")]
    Encode(#[from] serde_json::Error),
}

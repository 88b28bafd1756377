//! UseCase: 訪問者切断処理
//!
//! 切断（Open → Closed）では接続をブロードキャスト対象から外すだけで、
//! 訪問者数は変更しません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// 訪問者切断のユースケース
pub struct DisconnectVisitorUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectVisitorUseCase {
    /// 新しい DisconnectVisitorUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 訪問者切断を実行
    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.message_pusher.unregister_client(connection_id).await;
    }
}

//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理（ブロードキャスト対象の集合）
//! - 接続中のクライアントへのメッセージ送信（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! sender への送信はブロックしないため、ロックを保持したまま全員に送信できます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
/// pusher.register_client(connection_id, tx).await;
///
/// let targets = pusher.connection_ids().await;
/// pusher.broadcast(targets, r#"{"type":"visitorCount","count":1}"#).await;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn connection_ids(&self) -> Vec<ConnectionId> {
        let clients = self.clients.lock().await;
        clients.keys().cloned().collect()
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize {
        let clients = self.clients.lock().await;
        let mut delivered = 0;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                } else {
                    delivered += 1;
                    tracing::debug!("Broadcasted message to connection '{}'", target);
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                );
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 接続の登録・解除がブロードキャスト対象の集合に反映されること
    // - broadcast: 複数クライアントへの送信
    // - 閉じた接続・存在しない接続があっても他の接続への送信が続くこと
    // ========================================

    #[tokio::test]
    async fn test_register_and_unregister() {
        // テスト項目: 登録した接続が対象に含まれ、解除すると含まれなくなる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();

        // when (操作):
        pusher.register_client(id.clone(), tx).await;
        let after_register = pusher.connection_ids().await;
        pusher.unregister_client(&id).await;
        let after_unregister = pusher.connection_ids().await;

        // then (期待する結果):
        assert_eq!(after_register, vec![id]);
        assert!(after_unregister.is_empty());
    }

    #[tokio::test]
    async fn test_unregister_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続を解除しても問題なく処理される（冪等性）
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();

        // when (操作):
        pusher.unregister_client(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(pusher.connection_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のクライアントにメッセージをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(ConnectionId::generate(), tx1).await;
        pusher.register_client(ConnectionId::generate(), tx2).await;

        // when (操作):
        let targets = pusher.connection_ids().await;
        let delivered = pusher.broadcast(targets, "Broadcast message").await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_connection() {
        // テスト項目: 受信側が閉じた接続があっても他の接続には送信される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (stale_tx, stale_rx) = mpsc::unbounded_channel();
        let (live_tx, mut live_rx) = mpsc::unbounded_channel();
        pusher.register_client(ConnectionId::generate(), stale_tx).await;
        pusher.register_client(ConnectionId::generate(), live_tx).await;
        drop(stale_rx);

        // when (操作):
        let targets = pusher.connection_ids().await;
        let delivered = pusher.broadcast(targets, "hello").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(live_rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_skips_unknown_target() {
        // テスト項目: ブロードキャスト時、存在しない接続はスキップされる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let known = ConnectionId::generate();
        pusher.register_client(known.clone(), tx).await;

        // when (操作):
        let delivered = pusher
            .broadcast(vec![known, ConnectionId::generate()], "hello")
            .await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();

        // when (操作):
        let delivered = pusher.broadcast(vec![], "Message").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }
}

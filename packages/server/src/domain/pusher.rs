//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのメッセージ送信（通知）のインターフェース。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// クライアントへの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 接続中のクライアント集合への送信
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 登録中のすべての接続 ID
    async fn connection_ids(&self) -> Vec<ConnectionId>;

    /// 指定したクライアントに同じメッセージを送信
    ///
    /// 一部のクライアントへの送信失敗は他のクライアントへの送信を妨げません。
    ///
    /// # Returns
    ///
    /// 送信できたクライアント数
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize;
}

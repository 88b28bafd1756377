//! UseCase: 訪問者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectVisitorUseCase::execute() メソッド
//! - 接続の登録 → カウンタの increment → 全接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 新しい接続を含む「すべての」接続に最新の訪問者数が届くことを保証
//! - 並行に接続されても訪問者数が重複・欠落しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 接続、複数接続、並行接続
//! - 異常系：カウンタの永続化失敗

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePusher, PusherChannel, VisitorCount, VisitorCounter},
    infrastructure::dto::websocket::VisitorCountMessage,
};

use super::error::ConnectError;

/// 訪問者接続のユースケース
pub struct ConnectVisitorUseCase {
    /// VisitorCounter（永続化される訪問者数）
    counter: Arc<dyn VisitorCounter>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// increment とブロードキャストを 1 組として直列化する
    announce: Mutex<()>,
}

impl ConnectVisitorUseCase {
    /// 新しい ConnectVisitorUseCase を作成
    pub fn new(counter: Arc<dyn VisitorCounter>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            counter,
            message_pusher,
            announce: Mutex::new(()),
        }
    }

    /// 訪問者接続を実行（Connecting → Open）
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(VisitorCount)` - increment 後の訪問者数
    /// * `Err(ConnectError)` - カウンタの永続化に失敗（接続は登録されたまま、通知はしない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<VisitorCount, ConnectError> {
        // 1. ブロードキャスト対象に登録（新しい接続自身にも通知するため先に登録）
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 観測者には常に増加順で届く
        let _announce = self.announce.lock().await;

        // 2. 訪問者数を increment（永続化が完了してから返る）
        let count = self.counter.increment().await?;

        // 3. 接続中の全員にブロードキャスト
        let json = serde_json::to_string(&VisitorCountMessage::from(count))?;
        let targets = self.message_pusher.connection_ids().await;
        let target_count = targets.len();
        let delivered = self.message_pusher.broadcast(targets, &json).await;
        tracing::info!(
            "Visitor count {} broadcast to {}/{} connections (new connection '{}')",
            count.value(),
            delivered,
            target_count,
            connection_id
        );

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::CounterError,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::FileVisitorCounter,
        },
    };
    use async_trait::async_trait;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    async fn create_test_counter(dir: &TempDir) -> Arc<FileVisitorCounter> {
        Arc::new(FileVisitorCounter::load(dir.path().join("visitor_count.json")).await)
    }

    fn parse_count(message: &str) -> u64 {
        let parsed: VisitorCountMessage = serde_json::from_str(message).unwrap();
        parsed.count
    }

    #[tokio::test]
    async fn test_first_connection_receives_its_own_count() {
        // テスト項目: 最初の接続自身に訪問者数 1 が届く
        // given (前提条件):
        let dir = TempDir::new().unwrap();
        let counter = create_test_counter(&dir).await;
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectVisitorUseCase::new(counter.clone(), pusher);
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(ConnectionId::generate(), tx).await;

        // then (期待する結果):
        assert_eq!(result.unwrap().value(), 1);
        let message = rx.recv().await.unwrap();
        assert_eq!(message, r#"{"type":"visitorCount","count":1}"#);
        assert_eq!(counter.current().value(), 1);
    }

    #[tokio::test]
    async fn test_new_connection_is_broadcast_to_everyone() {
        // テスト項目: 2 人目の接続で、既存の接続と新しい接続の両方に訪問者数 2 が届く
        // given (前提条件):
        let dir = TempDir::new().unwrap();
        let counter = create_test_counter(&dir).await;
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectVisitorUseCase::new(counter, pusher);
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        usecase.execute(ConnectionId::generate(), tx1).await.unwrap();
        assert_eq!(parse_count(&rx1.recv().await.unwrap()), 1);

        // when (操作):
        usecase.execute(ConnectionId::generate(), tx2).await.unwrap();

        // then (期待する結果):
        assert_eq!(parse_count(&rx1.recv().await.unwrap()), 2);
        assert_eq!(parse_count(&rx2.recv().await.unwrap()), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_connections_observe_increasing_counts() {
        // テスト項目: 並行接続でも最終値が接続数と一致し、観測者には増加順で届く
        // given (前提条件):
        const N: usize = 20;
        let dir = TempDir::new().unwrap();
        let counter = create_test_counter(&dir).await;
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = Arc::new(ConnectVisitorUseCase::new(counter.clone(), pusher));
        let (observer_tx, mut observer_rx) = mpsc::unbounded_channel();
        usecase
            .execute(ConnectionId::generate(), observer_tx)
            .await
            .unwrap();

        // when (操作):
        let handles: Vec<_> = (0..N)
            .map(|_| {
                let usecase = usecase.clone();
                tokio::spawn(async move {
                    let (tx, rx) = mpsc::unbounded_channel();
                    let count = usecase.execute(ConnectionId::generate(), tx).await.unwrap();
                    // 受信側を保持しておく
                    (count.value(), rx)
                })
            })
            .collect();
        let mut counts = Vec::new();
        let mut receivers = Vec::new();
        for handle in handles {
            let (count, rx) = handle.await.unwrap();
            counts.push(count);
            receivers.push(rx);
        }

        // then (期待する結果):
        counts.sort_unstable();
        assert_eq!(counts, (2..=(N as u64 + 1)).collect::<Vec<_>>());
        assert_eq!(counter.current().value(), N as u64 + 1);

        let mut observed = Vec::new();
        while let Ok(message) = observer_rx.try_recv() {
            observed.push(parse_count(&message));
        }
        assert_eq!(observed, (1..=(N as u64 + 1)).collect::<Vec<_>>());
    }

    struct BrokenCounter;

    #[async_trait]
    impl VisitorCounter for BrokenCounter {
        async fn increment(&self) -> Result<VisitorCount, CounterError> {
            Err(CounterError::Persist(std::io::Error::other("disk full")))
        }

        fn current(&self) -> VisitorCount {
            VisitorCount::new(3)
        }
    }

    #[tokio::test]
    async fn test_persist_failure_skips_broadcast_but_keeps_connection() {
        // テスト項目: 永続化に失敗した場合はエラーを返し、通知はしないが接続は登録されたまま
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectVisitorUseCase::new(Arc::new(BrokenCounter), pusher.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();

        // when (操作):
        let result = usecase.execute(id.clone(), tx).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ConnectError::Counter(_))));
        assert!(rx.try_recv().is_err());
        assert_eq!(pusher.connection_ids().await, vec![id]);
    }
}

//! UseCase: ジョブオーダー送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitJobOrderUseCase::execute() メソッド
//! - 整形 → 配送方法の選択 → 配送 の順序と、結果の変換
//!
//! ### なぜこのテストが必要か
//! - 添付枚数に応じて正しい配送方法が選ばれることを保証
//! - 配送の失敗が握りつぶされずに呼び出し元へ返ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：添付 0 / 1 / 2 枚
//! - 異常系：API エラー、配送タスクの panic

use std::sync::Arc;

use jobrelay_shared::time::Clock;

use crate::domain::{Delivery, JobOrder, Notifier, format_job_order};

use super::error::SubmitJobOrderError;

/// ジョブオーダー送信のユースケース
pub struct SubmitJobOrderUseCase {
    /// Notifier（メッセージング API の抽象化）
    notifier: Arc<dyn Notifier>,
    /// Clock（受付時刻の取得）
    clock: Arc<dyn Clock>,
}

impl SubmitJobOrderUseCase {
    /// 新しい SubmitJobOrderUseCase を作成
    pub fn new(notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self { notifier, clock }
    }

    /// ジョブオーダー送信を実行
    ///
    /// 配送は別タスクで実行されるため、呼び出し元の Future が途中で破棄されても
    /// （依頼者の切断など）API 呼び出しは最後まで完了します。
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 配送成功
    /// * `Err(SubmitJobOrderError)` - 配送失敗（リトライはしない）
    pub async fn execute(&self, job_order: JobOrder) -> Result<(), SubmitJobOrderError> {
        let (fields, photo_url, attachments) = job_order.into_parts();

        // 1. 通知メッセージを整形
        let message = format_job_order(&fields, &self.clock.now());

        // 2. 添付枚数から配送方法を選択
        let delivery = Delivery::route(message, photo_url, attachments);
        let kind = delivery.kind();
        tracing::info!("Relaying job order as {}", kind);

        // 3. 配送
        let notifier = self.notifier.clone();
        let handle = tokio::spawn(async move { notifier.deliver(delivery).await });

        match handle.await {
            Ok(Ok(())) => {
                tracing::info!("Job order relayed ({})", kind);
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::warn!("Failed to relay job order ({}): {}", kind, e);
                Err(e.into())
            }
            Err(e) => {
                tracing::error!("Delivery task for job order ({}) failed: {}", kind, e);
                Err(SubmitJobOrderError::Internal(e.to_string()))
            }
        }
    }
}

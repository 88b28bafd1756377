//! VisitorCounter trait 定義
//!
//! 訪問者数はプロセス全体で共有される唯一の可変状態です。
//! すべての更新はこの trait の `increment` を通して直列化されます。

use async_trait::async_trait;

use super::{error::CounterError, value_object::VisitorCount};

/// 永続化される訪問者カウンタ
#[async_trait]
pub trait VisitorCounter: Send + Sync {
    /// カウンタを 1 増やし、永続化してから新しい値を返す
    ///
    /// 並行に呼ばれても更新が失われることはなく、
    /// 同じ値が 2 回返ることもありません。
    async fn increment(&self) -> Result<VisitorCount, CounterError>;

    /// メモリ上の現在値（I/O なし）
    fn current(&self) -> VisitorCount;
}

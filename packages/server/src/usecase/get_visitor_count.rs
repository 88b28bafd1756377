//! UseCase: 訪問者数取得（リアルタイム通知を使えないクライアント向け）

use std::sync::Arc;

use crate::domain::{VisitorCount, VisitorCounter};

/// 訪問者数取得のユースケース
pub struct GetVisitorCountUseCase {
    counter: Arc<dyn VisitorCounter>,
}

impl GetVisitorCountUseCase {
    pub fn new(counter: Arc<dyn VisitorCounter>) -> Self {
        Self { counter }
    }

    /// 現在の訪問者数（I/O なし）
    pub fn execute(&self) -> VisitorCount {
        self.counter.current()
    }
}

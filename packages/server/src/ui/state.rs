//! Server state.

use std::sync::Arc;

use crate::usecase::{
    ConnectVisitorUseCase, DisconnectVisitorUseCase, GetVisitorCountUseCase,
    SubmitJobOrderUseCase,
};

/// Shared application state
pub struct AppState {
    /// SubmitJobOrderUseCase（ジョブオーダー送信のユースケース）
    pub submit_job_order_usecase: Arc<SubmitJobOrderUseCase>,
    /// ConnectVisitorUseCase（訪問者接続のユースケース）
    pub connect_visitor_usecase: Arc<ConnectVisitorUseCase>,
    /// DisconnectVisitorUseCase（訪問者切断のユースケース）
    pub disconnect_visitor_usecase: Arc<DisconnectVisitorUseCase>,
    /// GetVisitorCountUseCase（訪問者数取得のユースケース）
    pub get_visitor_count_usecase: Arc<GetVisitorCountUseCase>,
}

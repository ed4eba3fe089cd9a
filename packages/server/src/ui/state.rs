//! Server state shared by connection handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, DispatchCommandUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加処理）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断処理）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// DispatchCommandUseCase（受信行の振り分け）
    pub dispatch_command_usecase: Arc<DispatchCommandUseCase>,
}

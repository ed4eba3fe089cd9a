//! UseCase: オンライン参加者の一覧

use std::sync::Arc;

use crate::domain::DisplayName;

use super::chat_hub::ChatHub;

/// 参加者一覧のユースケース
pub struct ListParticipantsUseCase {
    hub: Arc<ChatHub>,
}

impl ListParticipantsUseCase {
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self { hub }
    }

    /// 参加者名の一覧（アルファベット順）
    pub async fn execute(&self) -> Vec<DisplayName> {
        self.hub.list_names().await
    }
}

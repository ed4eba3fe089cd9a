//! UseCase: ニックネーム変更
//!
//! 成功時は全員（本人を含む）に変更を通知する。

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, RegistryError, message};

use super::chat_hub::ChatHub;

/// ニックネーム変更のユースケース
pub struct ChangeNicknameUseCase {
    hub: Arc<ChatHub>,
}

impl ChangeNicknameUseCase {
    /// 新しい ChangeNicknameUseCase を作成
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self { hub }
    }

    /// ニックネーム変更を実行
    ///
    /// # Returns
    ///
    /// * `Ok((old, new))` - 変更前と変更後の名前
    /// * `Err(RegistryError)` - 規則違反（`InvalidName`）・使用中（`NameTaken`）。状態は変わらない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        new_name: &str,
    ) -> Result<(DisplayName, DisplayName), RegistryError> {
        let (old, new) = self.hub.rename(connection_id, new_name).await?;
        tracing::info!("'{}' is now known as '{}'", old, new);

        self.hub
            .broadcast(&message::nickname_changed(&old, &new), None)
            .await;

        Ok((old, new))
    }
}

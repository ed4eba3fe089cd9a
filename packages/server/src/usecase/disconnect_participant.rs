//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - レジストリからの削除と退出通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済み参加者の切断
//! - エッジケース：名前を送る前に切断した接続（未登録）

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, message};

use super::chat_hub::ChatHub;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    hub: Arc<ChatHub>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self { hub }
    }

    /// 切断を実行
    ///
    /// 未登録の接続であれば何もしない。
    ///
    /// # Returns
    ///
    /// 登録されていた表示名
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let name = self.hub.unregister(connection_id).await?;

        self.hub
            .broadcast(&message::left(&name), Some(connection_id))
            .await;

        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{TestClient, create_test_hub, name};

    #[tokio::test]
    async fn test_disconnect_participant_success() {
        // テスト項目: 切断した参加者が削除され、残りの参加者に退出通知が届く
        // given (前提条件):
        let hub = create_test_hub().await;
        let usecase = DisconnectParticipantUseCase::new(hub.clone());
        let mut alice = TestClient::join(&hub, "alice").await;
        let mut bob = TestClient::join(&hub, "bob").await;

        // when (操作):
        let result = usecase.execute(&alice.id).await;

        // then (期待する結果):
        assert_eq!(result, Some(name("alice")));
        assert_eq!(hub.list_names().await, vec![name("bob")]);
        assert_eq!(bob.received(), vec!["[12:34] alice has left the chat"]);
        assert!(alice.received().is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_unregistered_connection_is_silent() {
        // テスト項目: 未登録の接続の切断では何も通知されない
        // given (前提条件):
        let hub = create_test_hub().await;
        let usecase = DisconnectParticipantUseCase::new(hub.clone());
        let mut bob = TestClient::join(&hub, "bob").await;
        let never_joined = TestClient::detached();

        // when (操作):
        let result = usecase.execute(&never_joined.id).await;

        // then (期待する結果):
        assert_eq!(result, None);
        assert!(bob.received().is_empty());
        assert!(hub.history_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_announces_current_name_after_rename() {
        // テスト項目: 名前変更後に切断した場合は変更後の名前で通知される
        // given (前提条件):
        let hub = create_test_hub().await;
        let usecase = DisconnectParticipantUseCase::new(hub.clone());
        let alice = TestClient::join(&hub, "alice").await;
        let mut bob = TestClient::join(&hub, "bob").await;
        hub.rename(&alice.id, "alicia").await.unwrap();

        // when (操作):
        usecase.execute(&alice.id).await;

        // then (期待する結果):
        assert_eq!(bob.received(), vec!["[12:34] alicia has left the chat"]);
    }
}

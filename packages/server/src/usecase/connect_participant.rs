//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 参加処理（名前の登録、履歴の再送、参加通知）
//!
//! ### なぜこのテストが必要か
//! - 参加時の名前はニックネーム規則で検証しない（`/nick` とは異なる）
//! - 名前の重複は参加時にも防ぐ必要がある
//! - 参加通知は本人以外にだけ届き、履歴に残る
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続
//! - 異常系：使用中の名前、空の名前

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, PusherChannel, RegistryError, message};

use super::{chat_hub::ChatHub, error::ConnectError};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    hub: Arc<ChatHub>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self { hub }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続 ID
    /// * `requested_name` - 最初に受信した行（そのまま表示名として使う）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(DisplayName)` - 登録された表示名
    /// * `Err(ConnectError)` - 参加失敗（状態は変更されない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        requested_name: &str,
        sender: PusherChannel,
    ) -> Result<DisplayName, ConnectError> {
        let name = DisplayName::new(requested_name.to_string())
            .map_err(|_| ConnectError::EmptyName)?;

        // 1. 登録と履歴の再送（同一ロック内）
        let replayed = self
            .hub
            .register(connection_id, name.clone(), sender)
            .await
            .map_err(|e| match e {
                RegistryError::NameTaken(taken) => ConnectError::NameTaken(taken),
                other => ConnectError::Registry(other),
            })?;
        tracing::debug!("Replayed {} history lines to '{}'", replayed, name);

        // 2. 本人以外に参加を通知
        self.hub
            .broadcast(&message::joined(&name), Some(&connection_id))
            .await;

        Ok(name)
    }
}

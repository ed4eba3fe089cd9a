//! UseCase: メッセージ送信処理（チャット本文 / `/me` アクション）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::chat() / action() メソッド
//! - 送信者以外へのブロードキャストと履歴への追加
//!
//! ### どのような状況を想定しているか
//! - 正常系：チャット本文、アクション
//! - エッジケース：送信者のみが接続している場合（ブロードキャスト対象なし）
//! - 異常系：未登録の接続からの送信

use std::sync::Arc;

use crate::domain::{ConnectionId, message};

use super::{chat_hub::ChatHub, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    hub: Arc<ChatHub>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self { hub }
    }

    /// `<name> says: <text>` を送信者以外にブロードキャスト
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 配送された整形済みの行
    /// * `Err(SendMessageError)` - 送信者が未登録
    pub async fn chat(
        &self,
        from: &ConnectionId,
        text: &str,
    ) -> Result<String, SendMessageError> {
        self.hub
            .broadcast_from(from, |name| message::says(name, text))
            .await
            .ok_or(SendMessageError::SenderNotRegistered)
    }

    /// `* <name> <action>` を送信者以外にブロードキャスト
    pub async fn action(
        &self,
        from: &ConnectionId,
        action: &str,
    ) -> Result<String, SendMessageError> {
        self.hub
            .broadcast_from(from, |name| message::action(name, action))
            .await
            .ok_or(SendMessageError::SenderNotRegistered)
    }
}

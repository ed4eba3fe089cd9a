//! UseCase: プライベートメッセージ
//!
//! 宛先にだけ届け、送信者には確認を返す。履歴には残らない。

use std::sync::Arc;

use crate::domain::ConnectionId;

use super::{chat_hub::ChatHub, error::PrivateMessageError};

/// プライベートメッセージのユースケース
pub struct SendPrivateMessageUseCase {
    hub: Arc<ChatHub>,
}

impl SendPrivateMessageUseCase {
    /// 新しい SendPrivateMessageUseCase を作成
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self { hub }
    }

    /// プライベートメッセージを送信
    ///
    /// 宛先への配送失敗は無視し、送信者への確認は常に試みる。
    pub async fn execute(
        &self,
        from: &ConnectionId,
        to: &str,
        text: &str,
    ) -> Result<(), PrivateMessageError> {
        self.hub.send_private(from, to, text).await
    }
}

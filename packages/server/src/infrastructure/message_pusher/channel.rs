//! mpsc チャンネルを使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! ソケットの書き込みは UI 層の writer タスク（`ui/handler/connection.rs`）が行います。
//! この実装はキューに積むだけなので、`ChatHub` のロックを保持したまま呼び出しても
//! 相手の受信速度に引きずられることはありません。

use std::collections::HashMap;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// mpsc チャンネルを使った MessagePusher 実装
#[derive(Debug, Default)]
pub struct ChannelMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: HashMap<ConnectionId, PusherChannel>,
}

impl ChannelMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessagePusher for ChannelMessagePusher {
    fn register_client(&mut self, connection_id: ConnectionId, channel: PusherChannel) {
        self.clients.insert(connection_id, channel);
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
    }

    fn unregister_client(&mut self, connection_id: &ConnectionId) -> bool {
        let removed = self.clients.remove(connection_id).is_some();
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
        removed
    }

    fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sender = self
            .clients
            .get(connection_id)
            .ok_or(MessagePushError::ClientNotFound(*connection_id))?;

        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

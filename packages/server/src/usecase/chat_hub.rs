//! ChatHub: 共有状態を保持する唯一のサービスオブジェクト
//!
//! レジストリ・履歴バッファ・送信チャンネルを 1 つの `Mutex` で保護します。
//! 各操作はロックを 1 回だけ取得し、1 つの論理操作（1 回のブロードキャスト、
//! 1 回の名前変更、1 回の一覧取得）で解放します。
//!
//! 接続タスクがマップやバッファに直接触れることはありません。

use std::sync::Arc;

use chatline_shared::time::{Clock, timestamp_prefix};
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, History, HistoryStore, MessagePushError, MessagePusher,
    PusherChannel, Registry, RegistryError, message,
};

use super::error::PrivateMessageError;

/// ロックで保護される状態
struct HubState {
    registry: Registry,
    history: History,
    pusher: Box<dyn MessagePusher>,
}

/// チャットの共有状態
pub struct ChatHub {
    state: Mutex<HubState>,
    /// 履歴の永続化先
    store: Arc<dyn HistoryStore>,
    /// `[HH:MM]` の時刻源
    clock: Arc<dyn Clock>,
}

impl ChatHub {
    /// 永続化された履歴を読み込んで ChatHub を作成
    ///
    /// 履歴ファイルが無い・壊れている場合は空の履歴で開始する（エラーにはしない）。
    pub async fn open(
        store: Arc<dyn HistoryStore>,
        pusher: Box<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        history_capacity: usize,
    ) -> Self {
        let history = match store.load().await {
            Ok(lines) => {
                let history = History::from_lines(lines, history_capacity);
                tracing::info!("Restored {} history lines", history.len());
                history
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("No persisted history found, starting empty");
                History::with_capacity(history_capacity)
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable history ({}), starting empty", e);
                History::with_capacity(history_capacity)
            }
        };

        Self {
            state: Mutex::new(HubState {
                registry: Registry::new(),
                history,
                pusher,
            }),
            store,
            clock,
        }
    }

    /// 参加者を登録し、履歴をその接続にだけ再送する
    ///
    /// 登録と再送を同じロック内で行うため、再送中に他のブロードキャストが
    /// 割り込んで行が欠けたり重複したりすることはない。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 再送した履歴の行数
    /// * `Err(RegistryError)` - 名前が使用中など
    pub async fn register(
        &self,
        connection_id: ConnectionId,
        name: DisplayName,
        channel: PusherChannel,
    ) -> Result<usize, RegistryError> {
        let mut state = self.state.lock().await;
        state.registry.register(connection_id, name)?;
        state.pusher.register_client(connection_id, channel);

        let mut replayed = 0;
        for line in state.history.snapshot() {
            if let Err(e) = state.pusher.push_to(&connection_id, &line) {
                tracing::debug!("Stopped history replay for '{}': {}", connection_id, e);
                break;
            }
            replayed += 1;
        }
        Ok(replayed)
    }

    /// 参加者を削除し、登録されていた名前を返す
    pub async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let mut state = self.state.lock().await;
        state.pusher.unregister_client(connection_id);
        state.registry.unregister(connection_id)
    }

    /// 表示名を変更し、`(変更前, 変更後)` を返す
    pub async fn rename(
        &self,
        connection_id: &ConnectionId,
        new_name: &str,
    ) -> Result<(DisplayName, DisplayName), RegistryError> {
        let mut state = self.state.lock().await;
        let old = state.registry.rename(connection_id, new_name)?;
        let new = state
            .registry
            .name_of(connection_id)
            .cloned()
            .ok_or(RegistryError::NotRegistered(*connection_id))?;
        Ok((old, new))
    }

    /// 接続の現在の表示名
    pub async fn name_of(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        self.state
            .lock()
            .await
            .registry
            .name_of(connection_id)
            .cloned()
    }

    /// オンラインの参加者名一覧
    pub async fn list_names(&self) -> Vec<DisplayName> {
        self.state.lock().await.registry.list_names()
    }

    /// 履歴のスナップショット
    pub async fn history_snapshot(&self) -> Vec<String> {
        self.state.lock().await.history.snapshot()
    }

    /// ブロードキャスト
    ///
    /// 1. `[HH:MM] ` を付けて整形
    /// 2. 履歴に追加して永続化（失敗はログのみ）
    /// 3. `exclude` 以外の全登録接続に配送（個々の失敗は無視）
    ///
    /// 全体を 1 回のロック内で行う。
    ///
    /// # Returns
    ///
    /// 整形済みの行
    pub async fn broadcast(&self, text: &str, exclude: Option<&ConnectionId>) -> String {
        let mut state = self.state.lock().await;
        self.broadcast_locked(&mut state, text, exclude).await
    }

    /// 送信者の現在の名前で本文を組み立て、送信者以外にブロードキャスト
    ///
    /// 名前の解決から配送までを 1 回のロック内で行う。送信者が未登録なら `None`。
    pub async fn broadcast_from<F>(&self, from: &ConnectionId, render: F) -> Option<String>
    where
        F: FnOnce(&DisplayName) -> String,
    {
        let mut state = self.state.lock().await;
        let text = render(state.registry.name_of(from)?);
        Some(self.broadcast_locked(&mut state, &text, Some(from)).await)
    }

    /// プライベートメッセージを宛先に届け、送信者に確認を返す（履歴には残らない）
    ///
    /// 名前の解決と 2 通の配送を 1 回のロック内で行う。
    /// 宛先への配送失敗は無視し、送信者への確認は常に試みる。
    pub async fn send_private(
        &self,
        from: &ConnectionId,
        to: &str,
        text: &str,
    ) -> Result<(), PrivateMessageError> {
        let state = self.state.lock().await;
        let sender = state
            .registry
            .name_of(from)
            .ok_or(PrivateMessageError::SenderNotRegistered)?;
        let (recipient, recipient_name) = state
            .registry
            .lookup(to)
            .and_then(|id| Some((id, state.registry.name_of(&id)?)))
            .ok_or_else(|| PrivateMessageError::RecipientNotFound(to.to_string()))?;

        let timestamp = self.timestamp();
        if let Err(e) = state.pusher.push_to(
            &recipient,
            &message::private_from(&timestamp, sender, text),
        ) {
            tracing::debug!("Private message to '{}' was not delivered: {}", to, e);
        }
        if let Err(e) = state.pusher.push_to(
            from,
            &message::private_to(&timestamp, recipient_name, text),
        ) {
            tracing::debug!("Private message confirmation was not delivered: {}", e);
        }
        Ok(())
    }

    async fn broadcast_locked(
        &self,
        state: &mut HubState,
        text: &str,
        exclude: Option<&ConnectionId>,
    ) -> String {
        let line = format!("{} {}", self.timestamp(), text);

        state.history.append(line.clone());
        if let Err(e) = self.store.save(&state.history.snapshot()).await {
            tracing::warn!("Failed to persist history: {}", e);
        }

        let targets: Vec<ConnectionId> = state
            .registry
            .connection_ids()
            .into_iter()
            .filter(|id| Some(id) != exclude)
            .collect();
        let delivered = state.pusher.broadcast(&targets, &line);
        tracing::debug!(
            "Broadcasted to {}/{} recipients: {}",
            delivered,
            targets.len(),
            line
        );

        line
    }

    /// 1 つの接続にだけ送信（履歴には残らない）
    pub async fn send_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        self.state.lock().await.pusher.push_to(connection_id, content)
    }

    /// 現在時刻の `[HH:MM]` プレフィックス
    pub fn timestamp(&self) -> String {
        timestamp_prefix(self.clock.local_time())
    }
}

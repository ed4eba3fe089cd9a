//! MessagePusher trait 定義
//!
//! 接続ごとの送信キューへのメッセージ配送を抽象化します。
//! 実装は `ChatHub` のロック内で呼ばれるため、同期メソッドで定義し、
//! 内部で待機（ソケット書き込みなど）してはならない。

use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionId};

/// クライアントへの送信チャンネル
///
/// 受信側は接続ごとの writer タスクが保持し、ソケットへ書き出す。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信（通知）の抽象化
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    fn register_client(&mut self, connection_id: ConnectionId, channel: PusherChannel);

    /// クライアントの送信チャンネルを削除（登録されていた場合 true）
    fn unregister_client(&mut self, connection_id: &ConnectionId) -> bool;

    /// 特定のクライアントに送信
    fn push_to(&self, connection_id: &ConnectionId, content: &str)
    -> Result<(), MessagePushError>;

    /// 複数のクライアントに送信し、配送できた件数を返す
    ///
    /// 個々の送信失敗は握りつぶし、残りの宛先への配送を続ける。
    fn broadcast(&self, targets: &[ConnectionId], content: &str) -> usize {
        targets
            .iter()
            .filter(|target| match self.push_to(target, content) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!("Skipping recipient during broadcast: {}", e);
                    false
                }
            })
            .count()
    }
}

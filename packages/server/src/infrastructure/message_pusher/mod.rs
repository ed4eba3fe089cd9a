//! メッセージ送信（通知）の実装
//!
//! - `channel`: 接続ごとの mpsc チャンネルを使った実装

pub mod channel;

pub use channel::ChannelMessagePusher;

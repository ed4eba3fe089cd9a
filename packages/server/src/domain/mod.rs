//! ドメイン層
//!
//! チャットサーバーのビジネスルール（参加者レジストリ、履歴バッファ、コマンド解析）と、
//! Infrastructure 層が実装するインターフェース（`HistoryStore`, `MessagePusher`）を定義します。

mod command;
mod error;
mod history;
pub mod message;
mod pusher;
mod registry;
mod repository;
mod value_object;

pub use command::Command;
pub use error::{
    CommandParseError, HistoryStoreError, MessagePushError, RegistryError, ValueObjectError,
};
pub use history::{DEFAULT_HISTORY_CAPACITY, History};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::Registry;
#[cfg(test)]
pub use repository::MockHistoryStore;
pub use repository::HistoryStore;
pub use value_object::{ConnectionId, DisplayName};

//! Infrastructure 層
//!
//! ドメイン層が定義する trait（`HistoryStore`, `MessagePusher`）の具体的な実装。

pub mod history_store;
pub mod message_pusher;

//! UseCase 層
//!
//! `ChatHub`（共有状態）を介して、接続・切断・各コマンドの処理を行います。

mod change_nickname;
mod chat_hub;
mod connect_participant;
mod disconnect_participant;
mod dispatch_command;
pub mod error;
mod list_participants;
mod send_message;
mod send_private_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use change_nickname::ChangeNicknameUseCase;
pub use chat_hub::ChatHub;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use dispatch_command::{CommandOutcome, DispatchCommandUseCase};
pub use error::{ConnectError, PrivateMessageError, SendMessageError};
pub use list_participants::ListParticipantsUseCase;
pub use send_message::SendMessageUseCase;
pub use send_private_message::SendPrivateMessageUseCase;

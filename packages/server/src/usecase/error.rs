//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RegistryError;

/// 参加処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Display name must not be empty")]
    EmptyName,

    #[error("Nickname {0} is already taken")]
    NameTaken(String),

    /// 名前の重複以外でレジストリが登録を拒否した
    #[error(transparent)]
    Registry(RegistryError),
}

/// チャット・アクション送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Sender is not registered")]
    SenderNotRegistered,
}

/// プライベートメッセージのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrivateMessageError {
    #[error("Sender is not registered")]
    SenderNotRegistered,

    #[error("User '{0}' not found.")]
    RecipientNotFound(String),
}

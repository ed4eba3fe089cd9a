//! ドメイン層のエラー型

use thiserror::Error;

use super::value_object::ConnectionId;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Display name must not be empty")]
    EmptyDisplayName,

    #[error("Invalid nickname '{0}'")]
    InvalidNickname(String),
}

/// レジストリ操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 他の接続が同じ名前を使用中
    #[error("Nickname {0} is already taken")]
    NameTaken(String),

    /// ニックネーム規則違反
    #[error("Invalid nickname '{0}'")]
    InvalidName(String),

    #[error("Connection {0} is not registered")]
    NotRegistered(ConnectionId),

    #[error("Connection {0} is already registered")]
    AlreadyRegistered(ConnectionId),
}

/// コマンド解析のエラー（送信者にのみ usage を返す）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("Usage: /msg <nick> <message>")]
    PrivateMessageUsage,

    #[error("Usage: /nick <new_nickname>")]
    NicknameUsage,

    #[error("Usage: /me <action>")]
    ActionUsage,
}

/// 履歴の永続化エラー
#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("History file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is not a valid JSON string array: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl HistoryStoreError {
    /// 履歴ファイルが存在しないだけか（初回起動時など）
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client {0} not found")]
    ClientNotFound(ConnectionId),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

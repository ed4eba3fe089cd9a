//! 値オブジェクト
//!
//! - `ConnectionId`: 接続ごとに払い出される不変の識別子（レジストリのキー）
//! - `DisplayName`: 参加者の表示名

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// ニックネームの最小文字数
const NICKNAME_MIN_LEN: usize = 3;
/// ニックネームの最大文字数
const NICKNAME_MAX_LEN: usize = 16;

/// 接続 ID
///
/// accept 時に生成され、接続が閉じるまで変わらない。
/// 表示名が変更されても参加者の同一性はこの ID で保たれる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 表示名
///
/// 生成経路が 2 つある:
///
/// - `DisplayName::new`: 参加時の名前。空でなければそのまま受け入れる
/// - `DisplayName::nickname`: `/nick` による変更。`[A-Za-z0-9_]{3,16}` を満たす必要がある
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    /// 参加時の表示名を作成（前後の空白を除去、空文字はエラー）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// ニックネーム規則を検証して表示名を作成
    pub fn nickname(value: String) -> Result<Self, ValueObjectError> {
        if !is_valid_nickname(&value) {
            return Err(ValueObjectError::InvalidNickname(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `[A-Za-z0-9_]{3,16}` に一致するか
fn is_valid_nickname(value: &str) -> bool {
    (NICKNAME_MIN_LEN..=NICKNAME_MAX_LEN).contains(&value.len())
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

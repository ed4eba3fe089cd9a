//! コマンド解析
//!
//! クライアントから受け取った 1 行を型付きの `Command` に変換する。
//! キーワード（先頭トークン）のみ大文字小文字を区別しない。
//! どのコマンドにも一致しない行は通常のチャット本文として扱う。

use super::error::CommandParseError;

/// 解析済みのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/list`
    List,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// `/msg <name> <text>`
    PrivateMessage { to: String, text: String },
    /// `/nick <name>` または `/nickname <name>`
    ChangeNickname { name: String },
    /// `/me <action>`
    Action { action: String },
    /// 上記以外の全て
    Chat { text: String },
}

impl Command {
    /// 1 行を解析する
    ///
    /// 前後の空白（`\r` を含む）は取り除いてから解析する。
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let line = line.trim();
        let keyword = line.split(' ').next().unwrap_or_default();
        let whole_line = keyword.len() == line.len();

        match keyword.to_ascii_lowercase().as_str() {
            "/list" if whole_line => Ok(Command::List),
            "/help" if whole_line => Ok(Command::Help),
            "/quit" if whole_line => Ok(Command::Quit),
            "/msg" => parse_private_message(line),
            "/nick" | "/nickname" => parse_change_nickname(line),
            "/me" => parse_action(line),
            _ => Ok(Command::Chat {
                text: line.to_string(),
            }),
        }
    }
}

/// `/msg <name> <text>`: 最初の 2 つの空白で 3 分割する（本文は空白を含んでよい）
fn parse_private_message(line: &str) -> Result<Command, CommandParseError> {
    let parts: Vec<&str> = line.splitn(3, ' ').collect();
    match parts.as_slice() {
        [_, to, text] if !to.is_empty() && !text.is_empty() => Ok(Command::PrivateMessage {
            to: to.to_string(),
            text: text.to_string(),
        }),
        _ => Err(CommandParseError::PrivateMessageUsage),
    }
}

/// `/nick <name>`: ちょうど 2 トークン
fn parse_change_nickname(line: &str) -> Result<Command, CommandParseError> {
    match exactly_one_argument(line) {
        Some(name) => Ok(Command::ChangeNickname {
            name: name.to_string(),
        }),
        None => Err(CommandParseError::NicknameUsage),
    }
}

/// `/me <action>`: ちょうど 2 トークン
fn parse_action(line: &str) -> Result<Command, CommandParseError> {
    match exactly_one_argument(line) {
        Some(action) => Ok(Command::Action {
            action: action.to_string(),
        }),
        None => Err(CommandParseError::ActionUsage),
    }
}

fn exactly_one_argument(line: &str) -> Option<&str> {
    let parts: Vec<&str> = line.split(' ').collect();
    match parts.as_slice() {
        [_, argument] if !argument.is_empty() => Some(argument),
        _ => None,
    }
}

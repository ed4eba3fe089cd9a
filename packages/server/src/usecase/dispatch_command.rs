//! UseCase: コマンドの振り分け
//!
//! 受信した 1 行を `Command` に解析し、対応するユースケースへ振り分けます。
//! usage エラー・検証エラー・一覧・ヘルプは送信者にだけ返信し、履歴には残しません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchCommandUseCase::execute() メソッド
//! - 各コマンドの返信先（送信者のみ / 送信者以外 / 全員）
//!
//! ### どのような状況を想定しているか
//! - 正常系：`/list`, `/help`, `/msg`, `/nick`, `/me`, `/quit`, 通常のチャット
//! - 異常系：usage エラー、ニックネーム規則違反、使用中の名前、存在しない宛先

use std::sync::Arc;

use crate::domain::{Command, ConnectionId, RegistryError, message};

use super::{
    change_nickname::ChangeNicknameUseCase, chat_hub::ChatHub,
    error::PrivateMessageError, list_participants::ListParticipantsUseCase,
    send_message::SendMessageUseCase, send_private_message::SendPrivateMessageUseCase,
};

/// 1 行を処理した後に接続をどうするか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// 受信ループを続ける
    Continue,
    /// クライアントが `/quit` を送った
    Quit,
}

/// コマンド振り分けのユースケース
pub struct DispatchCommandUseCase {
    hub: Arc<ChatHub>,
    send_message: SendMessageUseCase,
    send_private_message: SendPrivateMessageUseCase,
    change_nickname: ChangeNicknameUseCase,
    list_participants: ListParticipantsUseCase,
}

impl DispatchCommandUseCase {
    /// 新しい DispatchCommandUseCase を作成
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self {
            send_message: SendMessageUseCase::new(hub.clone()),
            send_private_message: SendPrivateMessageUseCase::new(hub.clone()),
            change_nickname: ChangeNicknameUseCase::new(hub.clone()),
            list_participants: ListParticipantsUseCase::new(hub.clone()),
            hub,
        }
    }

    /// 1 行を処理する
    ///
    /// 空行は無視する。
    pub async fn execute(&self, from: &ConnectionId, line: &str) -> CommandOutcome {
        let line = line.trim();
        if line.is_empty() {
            return CommandOutcome::Continue;
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.reply(from, &e.to_string()).await;
                return CommandOutcome::Continue;
            }
        };
        tracing::debug!("Dispatching {:?} from '{}'", command, from);

        match command {
            Command::List => {
                let names = self.list_participants.execute().await;
                self.reply(from, &message::online_users(&names)).await;
            }
            Command::Help => {
                self.reply(from, &message::help()).await;
            }
            Command::Quit => {
                return CommandOutcome::Quit;
            }
            Command::PrivateMessage { to, text } => {
                match self.send_private_message.execute(from, &to, &text).await {
                    Ok(()) => {}
                    Err(PrivateMessageError::RecipientNotFound(name)) => {
                        self.reply(from, &message::user_not_found(&name)).await;
                    }
                    Err(e) => tracing::warn!("Private message from '{}' dropped: {}", from, e),
                }
            }
            Command::ChangeNickname { name } => {
                match self.change_nickname.execute(from, &name).await {
                    Ok(_) => {}
                    Err(RegistryError::InvalidName(_)) => {
                        self.reply(from, message::INVALID_NICKNAME).await;
                    }
                    Err(RegistryError::NameTaken(name)) => {
                        self.reply(from, &message::nickname_taken(&name)).await;
                    }
                    Err(e) => tracing::warn!("Nickname change from '{}' failed: {}", from, e),
                }
            }
            Command::Action { action } => {
                if let Err(e) = self.send_message.action(from, &action).await {
                    tracing::warn!("Action from '{}' dropped: {}", from, e);
                }
            }
            Command::Chat { text } => {
                if let Err(e) = self.send_message.chat(from, &text).await {
                    tracing::warn!("Chat message from '{}' dropped: {}", from, e);
                }
            }
        }

        CommandOutcome::Continue
    }

    /// 送信者にだけ返信（失敗は無視）
    async fn reply(&self, to: &ConnectionId, content: &str) {
        if let Err(e) = self.hub.send_to(to, content).await {
            tracing::debug!("Reply to '{}' was not delivered: {}", to, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{TestClient, create_test_hub, name};

    async fn setup() -> (Arc<ChatHub>, DispatchCommandUseCase, TestClient, TestClient) {
        let hub = create_test_hub().await;
        let usecase = DispatchCommandUseCase::new(hub.clone());
        let alice = TestClient::join(&hub, "alice").await;
        let bob = TestClient::join(&hub, "bob").await;
        (hub, usecase, alice, bob)
    }

    #[tokio::test]
    async fn test_list_replies_to_sender_only() {
        // テスト項目: `/list` の結果は送信者にだけ届く
        // given (前提条件):
        let (hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        let outcome = usecase.execute(&alice.id, "/list").await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Continue);
        assert_eq!(alice.received(), vec!["Online users:\nalice\nbob"]);
        assert!(bob.received().is_empty());
        assert!(hub.history_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_help_replies_to_sender_only() {
        // テスト項目: `/help` のコマンド一覧は送信者にだけ届く
        // given (前提条件):
        let (_hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        usecase.execute(&alice.id, "/HELP").await;

        // then (期待する結果):
        assert_eq!(alice.received(), vec![message::help()]);
        assert!(bob.received().is_empty());
    }

    #[tokio::test]
    async fn test_private_message_and_not_found() {
        // テスト項目: `/msg` は宛先に届き、存在しない宛先はエラー返信になる
        // given (前提条件):
        let (_hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        usecase.execute(&bob.id, "/msg alice hello").await;
        usecase.execute(&bob.id, "/msg zed hello").await;

        // then (期待する結果):
        assert_eq!(alice.received(), vec!["[12:34][PM from bob]: hello"]);
        assert_eq!(
            bob.received(),
            vec!["[12:34][PM to alice]: hello", "User 'zed' not found."]
        );
    }

    #[tokio::test]
    async fn test_usage_errors_reply_to_sender_only() {
        // テスト項目: usage エラーは送信者にだけ返り、接続は継続する
        // given (前提条件):
        let (hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        let outcomes = vec![
            usecase.execute(&alice.id, "/msg bob").await,
            usecase.execute(&alice.id, "/nick").await,
            usecase.execute(&alice.id, "/me waves twice").await,
        ];

        // then (期待する結果):
        assert!(outcomes.iter().all(|o| *o == CommandOutcome::Continue));
        assert_eq!(
            alice.received(),
            vec![
                "Usage: /msg <nick> <message>",
                "Usage: /nick <new_nickname>",
                "Usage: /me <action>",
            ]
        );
        assert!(bob.received().is_empty());
        assert!(hub.history_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_nick_taken_and_invalid() {
        // テスト項目: 使用中・規則違反のニックネームはエラー返信になり、名前は変わらない
        // given (前提条件):
        let (hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        usecase.execute(&alice.id, "/nick bob").await;
        usecase.execute(&alice.id, "/nickname a").await;

        // then (期待する結果):
        assert_eq!(
            alice.received(),
            vec![
                "Nickname bob is already taken".to_string(),
                message::INVALID_NICKNAME.to_string(),
            ]
        );
        assert!(bob.received().is_empty());
        assert_eq!(hub.name_of(&alice.id).await, Some(name("alice")));
    }

    #[tokio::test]
    async fn test_nick_success_is_broadcast_to_everyone() {
        // テスト項目: ニックネーム変更の成功は全員に通知される
        // given (前提条件):
        let (_hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        usecase.execute(&alice.id, "/Nick alice_2").await;

        // then (期待する結果):
        let expected = vec!["[12:34] User changed nick name alice -> alice_2"];
        assert_eq!(alice.received(), expected);
        assert_eq!(bob.received(), expected);
    }

    #[tokio::test]
    async fn test_chat_and_action_skip_sender() {
        // テスト項目: チャットとアクションは送信者以外にだけ届く
        // given (前提条件):
        let (hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        usecase.execute(&alice.id, "hi everyone").await;
        usecase.execute(&alice.id, "/me waves").await;

        // then (期待する結果):
        assert_eq!(
            bob.received(),
            vec!["[12:34] alice says: hi everyone", "[12:34] * alice waves"]
        );
        assert!(alice.received().is_empty());
        assert_eq!(hub.history_snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_quit_and_blank_lines() {
        // テスト項目: `/quit` は Quit を返し、空行は無視される
        // given (前提条件):
        let (hub, usecase, mut alice, mut bob) = setup().await;

        // when (操作):
        let blank = usecase.execute(&alice.id, "   ").await;
        let quit = usecase.execute(&alice.id, "/quit").await;

        // then (期待する結果):
        assert_eq!(blank, CommandOutcome::Continue);
        assert_eq!(quit, CommandOutcome::Quit);
        assert!(alice.received().is_empty());
        assert!(bob.received().is_empty());
        assert!(hub.history_snapshot().await.is_empty());
    }
}

//! HistoryStore trait 定義
//!
//! 履歴バッファの永続化先へのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::error::HistoryStoreError;

/// 履歴の永続化ストア
///
/// `save` は毎回全件を書き直す。部分的な追記は行わない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// 保存されている全行を古い順に読み込む
    async fn load(&self) -> Result<Vec<String>, HistoryStoreError>;

    /// 現在の履歴全体で保存内容を置き換える
    async fn save(&self, lines: &[String]) -> Result<(), HistoryStoreError>;
}

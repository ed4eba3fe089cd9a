//! JSON ファイルを使った HistoryStore 実装
//!
//! ## 保存形式
//!
//! ```json
//! [
//!   "[12:00] alice has joined the chat",
//!   "[12:01] alice says: hi"
//! ]
//! ```
//!
//! ## 書き込み
//!
//! 同じディレクトリの一時ファイル（`<path>.tmp`）に全件を書き出してから
//! `rename` で置き換える。途中でクラッシュしても元のファイルが壊れることはない。

use std::{ffi::OsString, path::PathBuf};

use async_trait::async_trait;

use crate::domain::{HistoryStore, HistoryStoreError};

/// JSON ファイルを使った履歴ストア
pub struct JsonFileHistoryStore {
    /// 履歴ファイルのパス
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// 新しい JsonFileHistoryStore を作成（ファイルはまだ作られない）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp: OsString = self.path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> Result<Vec<String>, HistoryStoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let lines: Vec<String> = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            "Loaded {} history lines from '{}'",
            lines.len(),
            self.path.display()
        );
        Ok(lines)
    }

    async fn save(&self, lines: &[String]) -> Result<(), HistoryStoreError> {
        let json = serde_json::to_vec_pretty(lines)?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - JsonFileHistoryStore の読み書き
    // - ファイルが存在しない / 壊れている場合のエラー種別
    //
    // 【なぜこのテストが必要か】
    // - 再起動後に履歴が同じ順序で復元されることを保証する
    // - 起動時の読み込み失敗を「空の履歴で開始」に落とせるよう、エラーを区別できる必要がある
    // ========================================

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        // テスト項目: 保存した行が同じ順序で読み込める
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("history.json"));
        let saved = lines(&["[10:00] first", "[10:01] second", "[10:02] third"]);

        // when (操作):
        store.save(&saved).await.unwrap();
        let loaded = store.load().await.unwrap();

        // then (期待する結果):
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_content() {
        // テスト項目: 保存は追記ではなく全体の置き換え
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("history.json"));
        store.save(&lines(&["old 1", "old 2"])).await.unwrap();

        // when (操作):
        store.save(&lines(&["new"])).await.unwrap();

        // then (期待する結果):
        assert_eq!(store.load().await.unwrap(), lines(&["new"]));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_saved_file_is_pretty_json_array() {
        // テスト項目: ファイルはインデント付きの JSON 文字列配列
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileHistoryStore::new(&path);

        // when (操作):
        store.save(&lines(&["[09:00] hello"])).await.unwrap();

        // then (期待する結果):
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "[\n  \"[09:00] hello\"\n]");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        // テスト項目: ファイルが無い場合は NotFound として区別できる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("missing.json"));

        // when (操作):
        let result = store.load().await;

        // then (期待する結果):
        let err = result.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        // テスト項目: JSON として壊れたファイルは Malformed エラー
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileHistoryStore::new(&path);

        // when (操作):
        let result = store.load().await;

        // then (期待する結果):
        assert!(matches!(result, Err(HistoryStoreError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_load_wrong_json_shape() {
        // テスト項目: 文字列配列以外の JSON も Malformed エラー
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let store = JsonFileHistoryStore::new(&path);

        // when (操作):
        let result = store.load().await;

        // then (期待する結果):
        assert!(matches!(result, Err(HistoryStoreError::Malformed(_))));
    }
}

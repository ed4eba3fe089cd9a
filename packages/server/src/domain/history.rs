//! 履歴バッファ
//!
//! ブロードキャストされた行（`[HH:MM] ...` 整形済み）を古い順に保持する固定長 FIFO。
//! 新規参加者への再送と、再起動をまたいだ永続化に使われる。

use std::collections::VecDeque;

/// 履歴バッファのデフォルト容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// 固定長の履歴バッファ
///
/// 容量を超えた場合は最も古い行から捨てる（厳密な FIFO）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    /// 指定容量の空の履歴を作成（容量 0 は 1 として扱う）
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 永続化された行から履歴を復元
    ///
    /// 容量より多い場合は末尾（新しい側）の `capacity` 件だけを残す。
    pub fn from_lines(lines: Vec<String>, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        let skip = lines.len().saturating_sub(history.capacity);
        history.entries.extend(lines.into_iter().skip(skip));
        history
    }

    /// 行を追加する。容量超過で押し出された行があれば返す。
    pub fn append(&mut self, line: String) -> Option<String> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(line);
        evicted
    }

    /// 古い順のスナップショット
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

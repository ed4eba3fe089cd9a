//! 履歴永続化の実装
//!
//! - `json_file`: JSON ファイルに文字列配列として保存する実装

pub mod json_file;

pub use json_file::JsonFileHistoryStore;

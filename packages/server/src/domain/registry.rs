//! 接続レジストリ
//!
//! 接続 ID から表示名へのマップ。「誰がオンラインか」の唯一の情報源。
//! 排他制御は呼び出し側（`ChatHub`）の単一ロックで行う。

use std::collections::HashMap;

use super::{
    error::RegistryError,
    value_object::{ConnectionId, DisplayName},
};

/// 接続レジストリ
///
/// 同じ表示名を複数の接続が同時に保持することはない。
#[derive(Debug, Default)]
pub struct Registry {
    participants: HashMap<ConnectionId, DisplayName>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者を登録
    pub fn register(
        &mut self,
        connection_id: ConnectionId,
        name: DisplayName,
    ) -> Result<(), RegistryError> {
        if self.participants.contains_key(&connection_id) {
            return Err(RegistryError::AlreadyRegistered(connection_id));
        }
        if self.is_name_in_use(name.as_str()) {
            return Err(RegistryError::NameTaken(name.as_str().to_string()));
        }
        self.participants.insert(connection_id, name);
        Ok(())
    }

    /// 参加者を削除（未登録なら `None`）
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Option<DisplayName> {
        self.participants.remove(connection_id)
    }

    /// 表示名を変更し、変更前の名前を返す
    ///
    /// ニックネーム規則の検証が先、重複チェックが後。
    /// 自分自身の現在の名前と同じ名前も「使用中」として扱う。
    pub fn rename(
        &mut self,
        connection_id: &ConnectionId,
        new_name: &str,
    ) -> Result<DisplayName, RegistryError> {
        let new_name = DisplayName::nickname(new_name.to_string())
            .map_err(|_| RegistryError::InvalidName(new_name.to_string()))?;

        if !self.participants.contains_key(connection_id) {
            return Err(RegistryError::NotRegistered(*connection_id));
        }
        if self.is_name_in_use(new_name.as_str()) {
            return Err(RegistryError::NameTaken(new_name.as_str().to_string()));
        }

        self.participants
            .insert(*connection_id, new_name)
            .ok_or(RegistryError::NotRegistered(*connection_id))
    }

    /// 表示名から接続 ID を検索
    pub fn lookup(&self, name: &str) -> Option<ConnectionId> {
        self.participants
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    pub fn name_of(&self, connection_id: &ConnectionId) -> Option<&DisplayName> {
        self.participants.get(connection_id)
    }

    /// 表示名の一覧（アルファベット順）
    pub fn list_names(&self) -> Vec<DisplayName> {
        let mut names: Vec<DisplayName> = self.participants.values().cloned().collect();
        names.sort();
        names
    }

    /// 登録中の全接続 ID
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.participants.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn is_name_in_use(&self, name: &str) -> bool {
        self.participants.values().any(|n| n.as_str() == name)
    }
}

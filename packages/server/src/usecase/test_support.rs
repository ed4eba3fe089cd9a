//! Helpers shared by use case tests.

use std::sync::Arc;

use chatline_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, DisplayName, MockHistoryStore},
    infrastructure::message_pusher::ChannelMessagePusher,
};

use super::ChatHub;

pub fn name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

/// A store with no persisted lines that accepts every save
pub fn accepting_store() -> MockHistoryStore {
    let mut store = MockHistoryStore::new();
    store.expect_load().returning(|| Ok(vec![]));
    store.expect_save().returning(|_| Ok(()));
    store
}

/// Hub with an empty history and a clock fixed at 12:34
pub async fn create_test_hub() -> Arc<ChatHub> {
    Arc::new(
        ChatHub::open(
            Arc::new(accepting_store()),
            Box::new(ChannelMessagePusher::new()),
            Arc::new(FixedClock::at(12, 34)),
            20,
        )
        .await,
    )
}

/// A registered participant whose outbound queue can be inspected
pub struct TestClient {
    pub id: ConnectionId,
    pub tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// Open a queue without registering it
    pub fn detached() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            id: ConnectionId::generate(),
            tx,
            rx,
        }
    }

    /// Register directly with the hub under `display_name`
    pub async fn join(hub: &ChatHub, display_name: &str) -> Self {
        let client = Self::detached();
        hub.register(client.id, name(display_name), client.tx.clone())
            .await
            .unwrap();
        client
    }

    /// Drain everything queued so far
    pub fn received(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = self.rx.try_recv() {
            lines.push(line);
        }
        lines
    }
}

//! Per-connection lifecycle: `AwaitingName → Active → Disconnected`.

use std::{net::SocketAddr, sync::Arc};

use futures_util::stream::StreamExt;
use tokio::{
    io::AsyncWriteExt,
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
};
use tokio_util::codec::FramedRead;

use super::codec::{ChatLineCodec, Line};
use crate::{
    domain::{ConnectionId, DisplayName, PusherChannel, message},
    ui::state::AppState,
    usecase::{CommandOutcome, ConnectError},
};

/// Maximum accepted line length in bytes (excluding the newline)
pub const MAX_LINE_LENGTH: usize = 4096;

type LineReader = FramedRead<OwnedReadHalf, ChatLineCodec>;

/// Drive one accepted connection until it closes.
///
/// Never returns an error: every failure is scoped to this connection.
pub async fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (read_half, write_half) = stream.into_split();
    let mut lines = FramedRead::new(read_half, ChatLineCodec::new(MAX_LINE_LENGTH));

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let writer = pusher_loop(rx, write_half);

    let Some(name) = await_name(&mut lines, &state, connection_id, &tx).await else {
        tracing::info!("{} disconnected before choosing a name", peer_addr);
        drop(tx);
        let _ = writer.await;
        return;
    };
    tracing::info!("{} is now known as '{}'", peer_addr, name);
    lines.decoder_mut().name_accepted();

    receive_loop(&mut lines, &state, connection_id, &tx).await;

    // Teardown: the hub drops its sender on unregister, so the writer drains and exits
    if let Some(name) = state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        tracing::info!("'{}' ({}) disconnected", name, peer_addr);
    }
    drop(tx);
    let _ = writer.await;
}

/// Read lines until one is accepted as this connection's display name.
///
/// The first payload counts even without a trailing newline.
/// Blank lines are skipped. A taken name is reported and the next line is tried.
/// Returns `None` if the stream ends first.
async fn await_name(
    lines: &mut LineReader,
    state: &AppState,
    connection_id: ConnectionId,
    tx: &PusherChannel,
) -> Option<DisplayName> {
    loop {
        let line = match next_line(lines, tx).await? {
            Some(line) => line,
            None => continue,
        };

        match state
            .connect_participant_usecase
            .execute(connection_id, &line, tx.clone())
            .await
        {
            Ok(name) => return Some(name),
            Err(ConnectError::EmptyName) => continue,
            Err(ConnectError::NameTaken(taken)) => {
                tracing::debug!("Join rejected, '{}' is taken", taken);
                let _ = tx.send(message::nickname_taken(&taken));
            }
            Err(e) => {
                tracing::warn!("Join failed for {}: {}", connection_id, e);
                return None;
            }
        }
    }
}

/// Feed every received line to the dispatcher until EOF, an I/O error or `/quit`.
async fn receive_loop(
    lines: &mut LineReader,
    state: &AppState,
    connection_id: ConnectionId,
    tx: &PusherChannel,
) {
    while let Some(line) = next_line(lines, tx).await {
        let Some(line) = line else {
            continue;
        };

        let outcome = state
            .dispatch_command_usecase
            .execute(&connection_id, &line)
            .await;
        if outcome == CommandOutcome::Quit {
            tracing::debug!("{} sent /quit", connection_id);
            break;
        }
    }
}

/// Next line from the peer.
///
/// * `None` - stream ended or failed
/// * `Some(None)` - an over-long line was discarded; the caller should keep reading
/// * `Some(Some(line))` - a complete line
async fn next_line(lines: &mut LineReader, tx: &PusherChannel) -> Option<Option<String>> {
    match lines.next().await? {
        Ok(Line::Text(line)) => Some(Some(line)),
        Ok(Line::TooLong) => {
            let _ = tx.send(message::line_too_long(MAX_LINE_LENGTH));
            Some(None)
        }
        Err(e) => {
            tracing::debug!("Read error: {}", e);
            None
        }
    }
}

/// Spawns a task that receives messages from the rx channel and writes them to the socket.
///
/// Each message is terminated with `\n`. The task ends when every sender is
/// dropped or a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut writer: OwnedWriteHalf,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let mut frame = msg.into_bytes();
            frame.push(b'\n');
            if let Err(e) = writer.write_all(&frame).await {
                tracing::debug!("Write failed, closing writer: {}", e);
                break;
            }
        }
        let _ = writer.shutdown().await;
    })
}

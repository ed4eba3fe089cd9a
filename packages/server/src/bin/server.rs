//! Line-oriented TCP chat server.
//!
//! The first line a client sends is its display name; every following line is
//! a command (`/list`, `/msg`, `/nick`, `/me`, `/help`, `/quit`) or chat text
//! broadcast to everyone else.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatline-server
//! cargo run --bin chatline-server -- --host 127.0.0.1 --port 6000 --history-file /tmp/history.json
//! ```

use std::{path::PathBuf, sync::Arc};

use chatline_server::{
    domain::DEFAULT_HISTORY_CAPACITY,
    infrastructure::{history_store::JsonFileHistoryStore, message_pusher::ChannelMessagePusher},
    ui::{DEFAULT_HOST, DEFAULT_PORT, Server},
    usecase::{
        ChatHub, ConnectParticipantUseCase, DisconnectParticipantUseCase, DispatchCommandUseCase,
    },
};
use chatline_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatline-server")]
#[command(about = "Line-oriented TCP chat server with persisted history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// JSON file holding the most recent broadcast lines
    #[arg(long, default_value = "chat_history.json")]
    history_file: PathBuf,

    /// Number of broadcast lines kept and replayed to new participants
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. HistoryStore / MessagePusher
    // 2. ChatHub (loads persisted history)
    // 3. UseCases
    // 4. Server

    // 1. Create infrastructure
    let store = Arc::new(JsonFileHistoryStore::new(&args.history_file));
    let pusher = Box::new(ChannelMessagePusher::new());

    // 2. Create the shared hub
    let hub = Arc::new(
        ChatHub::open(store, pusher, Arc::new(SystemClock), args.history_capacity).await,
    );
    tracing::info!(
        "History file: {} (capacity {})",
        args.history_file.display(),
        args.history_capacity
    );

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(hub.clone()));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(hub.clone()));
    let dispatch_command_usecase = Arc::new(DispatchCommandUseCase::new(hub));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        dispatch_command_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

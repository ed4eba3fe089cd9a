//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::net::TcpListener;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, DispatchCommandUseCase,
};

use super::{handler::connection::handle_connection, signal::shutdown_signal, state::AppState};

/// Listen on all interfaces by default
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default TCP port
pub const DEFAULT_PORT: u16 = 5001;

/// Pause after a failed accept (e.g. out of file descriptors) before retrying
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP chat server
///
/// This struct encapsulates the use cases and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     dispatch_command_usecase,
/// );
/// server.run("0.0.0.0".to_string(), 5001).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（参加処理のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断処理のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// DispatchCommandUseCase（コマンド振り分けのユースケース）
    dispatch_command_usecase: Arc<DispatchCommandUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_participant_usecase` - UseCase for the join handshake
    /// * `disconnect_participant_usecase` - UseCase for teardown
    /// * `dispatch_command_usecase` - UseCase routing each received line
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        dispatch_command_usecase: Arc<DispatchCommandUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            dispatch_command_usecase,
        }
    }

    /// Run the chat server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 5001)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Accept connections on `listener` until `shutdown` resolves
    ///
    /// Each connection runs on its own task; the accept loop never waits on them.
    /// Accept errors are logged and the loop keeps going after a short pause.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            dispatch_command_usecase: self.dispatch_command_usecase,
        });

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        tracing::info!("Accepted connection from {}", peer_addr);
                        tokio::spawn(handle_connection(stream, peer_addr, app_state.clone()));
                    }
                    Err(e) => accept_failed(&e).await,
                },
            }
        }
    }
}

/// Log a failed accept and pause so a persistent failure does not spin the loop
async fn accept_failed(e: &std::io::Error) {
    tracing::warn!("Failed to accept connection: {}", e);
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}

use std::io;

use common::{utility::random_address, websocket::WebsocketHandler};
use tokio::{net::TcpListener, sync::broadcast, task::JoinHandle};
use tracing::{info, Level};

use crate::service::{
    game_manager::{GameManager, SessionRegistry},
    game_socket::GameSocket,
};

#[derive(Debug, Clone)]
pub struct GameServerConfig {
    pub manager_address: String,
    pub socket_address: String,
}

pub async fn serve(
    config: GameServerConfig,
    mut shutdown_receiver: broadcast::Receiver<()>,
    ready_signal: Option<tokio::sync::oneshot::Sender<()>>,
) -> io::Result<()> {
    // Bind up front so that "ready" means connectable
    let manager_listener = TcpListener::bind(&config.manager_address).await?;
    let socket_listener = TcpListener::bind(&config.socket_address).await?;

    // Session threads get their own shutdown fan-out
    let (session_shutdown_sender, _) = broadcast::channel::<()>(1);
    let registry = SessionRegistry::new(session_shutdown_sender.clone());

    let manager_shutdown_receiver = shutdown_receiver.resubscribe();
    let socket_shutdown_receiver = shutdown_receiver.resubscribe();

    // REST endpoint: create sessions and play rounds
    let manager_registry = registry.clone();
    let manager_handle: JoinHandle<()> = tokio::spawn(async move {
        GameManager::listen(manager_listener, manager_registry, manager_shutdown_receiver).await
    });
    // Websocket handler - one session per connection
    let websocket_handle: JoinHandle<()> = tokio::spawn(async move {
        GameSocket::new(registry)
            .listen(socket_listener, socket_shutdown_receiver)
            .await
    });

    // Signal that the server is ready
    if let Some(ready_signal) = ready_signal {
        info!("Sent ready");
        let _ = ready_signal.send(());
    }

    let _ = shutdown_receiver.recv().await;
    let _ = session_shutdown_sender.send(());

    if let Err(e) = manager_handle.await {
        tracing::error!("Game manager exited non-gracefully: {}", e);
    }
    if let Err(e) = websocket_handle.await {
        tracing::error!("Websocket exited non-gracefully: {}", e);
    }
    info!("Game server stopped");
    Ok(())
}

/// In-process server on random local ports, for tests.
pub struct GameServer {
    pub manager_address: String,
    pub socket_address: String,
    shutdown_sender: broadcast::Sender<()>,
    handle: JoinHandle<io::Result<()>>,
}
impl GameServer {
    pub async fn new() -> io::Result<Self> {
        // Init logging, ignore error if already set
        let _ = tracing_subscriber::fmt()
            .with_line_number(true)
            .with_file(true)
            .with_max_level(Level::DEBUG)
            .try_init();

        let config = GameServerConfig {
            manager_address: random_address().await?,
            socket_address: random_address().await?,
        };
        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (ready_sender, ready_receiver) = tokio::sync::oneshot::channel();
        let handle = tokio::spawn(serve(config.clone(), shutdown_receiver, Some(ready_sender)));

        // Wait for server to be ready
        if ready_receiver.await.is_err() {
            return match handle.await {
                Ok(Err(e)) => Err(e),
                _ => Err(io::Error::other("Server failed to start")),
            };
        }

        Ok(GameServer {
            manager_address: config.manager_address,
            socket_address: config.socket_address,
            shutdown_sender,
            handle,
        })
    }

    pub fn rest_url(&self, endpoint: &str) -> String {
        format!("http://{}/{}", self.manager_address, endpoint)
    }

    pub fn socket_url(&self) -> String {
        format!("ws://{}/", self.socket_address)
    }

    pub async fn shutdown(self) -> io::Result<()> {
        let _ = self.shutdown_sender.send(());
        self.handle.await.map_err(io::Error::other)?
    }
}

use std::io;

use tokio::{net::TcpListener, signal, sync::broadcast};

/// Broadcast channel that fires once on Ctrl-C or SIGTERM.
pub fn create_shutdown_channel() -> broadcast::Receiver<()> {
    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(16);
    tokio::spawn(async move {
        shutdown_signal().await;
        // Nobody listening means everything has already exited
        let _ = shutdown_sender.send(());
    });
    shutdown_receiver
}

// Source: https://pg3.dev/post/7
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}

/// Free local address, for servers spun up by tests.
pub async fn random_address() -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    Ok(listener.local_addr()?.to_string())
}

use std::net::SocketAddr;

use async_trait::async_trait;
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{
    net::{TcpListener, TcpStream},
    sync::broadcast,
};
use tokio_tungstenite::{
    accept_async,
    tungstenite::{
        self,
        protocol::{frame::coding::CloseCode, CloseFrame},
        Message,
    },
    WebSocketStream,
};
use tracing::{debug, error, info, warn};

type SocketWriteHandle = SplitSink<WebSocketStream<TcpStream>, Message>;

#[derive(Error, Debug)]
pub enum SocketError {
    #[error("Could not serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Websocket error: {0}")]
    Socket(#[from] tungstenite::Error),
}

pub async fn send_json<T: Serialize>(
    ws_sender: &mut SocketWriteHandle,
    body: &T,
) -> Result<(), SocketError> {
    let body = serde_json::to_string(body)?;
    ws_sender.send(Message::Text(body)).await?;
    Ok(())
}

/// Accept loop plus one task per connection. Implementors only decide what a
/// connection owns and how a request is answered.
#[async_trait]
pub trait WebsocketHandler<ExternalRQ, ExternalRS>
where
    Self: Clone + Send + Sync + 'static,
    ExternalRQ: for<'de> Deserialize<'de> + Send + 'static,
    ExternalRS: Serialize + Send + Sync + 'static,
{
    type Connection: Send + 'static;

    // Called once the handshake is done. `None` refuses the connection; the
    // optional response is sent before any request is read.
    async fn open(&self, address: SocketAddr) -> Option<(Self::Connection, Option<ExternalRS>)>;

    // Logic to handle a client's request
    async fn respond_to_request(
        &self,
        connection: &mut Self::Connection,
        request: ExternalRQ,
    ) -> Option<ExternalRS>;

    // Response for a message that doesn't parse. By default, ignore it.
    fn reject_request(&self, _error: serde_json::Error) -> Option<ExternalRS> {
        None
    }

    async fn close(&self, _connection: Self::Connection) {}

    // Criterion to drop connection. By default, always keep the connection alive.
    fn drop_after_send(_response: &ExternalRS) -> bool {
        false
    }

    async fn listen(self, ws_listener: TcpListener, mut shutdown_receiver: broadcast::Receiver<()>) {
        let address = ws_listener
            .local_addr()
            .map(|address| address.to_string())
            .unwrap_or_default();
        info!("Initialized ws listener: {}", address);
        loop {
            tokio::select! {
                result = ws_listener.accept() => {
                    match result {
                        Err(e) => {
                            error!("Failed to accept connection from {} with error: {}", address, e);
                        }
                        Ok((stream, peer)) => {
                            tokio::spawn(self.clone().connection_thread(
                                stream,
                                peer,
                                shutdown_receiver.resubscribe(),
                            ));
                        }
                    }
                },
                _ = shutdown_receiver.recv() => {
                    break;
                }
            };
        }
        info!("Exited ws listener");
    }

    // Thread to handle connection lifetime
    async fn connection_thread(
        self,
        stream: TcpStream,
        address: SocketAddr,
        mut shutdown_receiver: broadcast::Receiver<()>,
    ) {
        info!("New ws connection: {}", address);
        let stream = match accept_async(stream).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Handshake with {} failed: {}", address, e);
                return;
            }
        };
        let (mut ws_sender, mut ws_receiver) = stream.split();

        let Some((mut connection, greeting)) = self.open(address).await else {
            warn!("Refused connection from {}", address);
            let _ = ws_sender.send(Message::Close(None)).await;
            return;
        };
        if let Some(greeting) = greeting {
            if let Err(e) = send_json(&mut ws_sender, &greeting).await {
                warn!("Failed to greet {}: {}", address, e);
                self.close(connection).await;
                return;
            }
        }

        loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    let msg = match msg {
                        None => break,
                        Some(Err(e)) => {
                            warn!("Error receiving message from {}: {}", address, e);
                            break;
                        }
                        Some(Ok(msg)) => msg,
                    };
                    debug!("msg: {:?}", msg);
                    let response = match msg {
                        Message::Text(body) => match serde_json::from_str::<ExternalRQ>(&body) {
                            Ok(request) => self.respond_to_request(&mut connection, request).await,
                            Err(e) => {
                                warn!("Failed to parse request from {}: {}", address, e);
                                self.reject_request(e)
                            }
                        },
                        Message::Close(_) => break,
                        Message::Binary(_) => {
                            warn!("Received non-text message");
                            None
                        }
                        _ => None,
                    };
                    let Some(response) = response else {
                        continue;
                    };

                    let close_socket = Self::drop_after_send(&response);
                    if let Err(e) = send_json(&mut ws_sender, &response).await {
                        warn!("Failed to respond to {}: {}", address, e);
                        break;
                    }
                    if close_socket {
                        let _ = ws_sender
                            .send(Message::Close(Some(CloseFrame {
                                code: CloseCode::Normal,
                                reason: "Decided to close after sending the previous message".into(),
                            })))
                            .await;
                        break;
                    }
                }
                _ = shutdown_receiver.recv() => {
                    let _ = ws_sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
        self.close(connection).await;
        info!("Closed ws connection: {}", address);
    }
}

//! WebSocket-backed realtime channel carrying JSON event frames.

use futures::{SinkExt, StreamExt};
use shared::protocol::{ClientEvent, ServerEvent};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::{channel::RealtimeChannel, error::ChannelError};

pub struct WsChannel {
    outbound: mpsc::UnboundedSender<String>,
    writer: JoinHandle<()>,
    reader: JoinHandle<()>,
}

/// Normalizes a server url to a websocket url; http(s) is rewritten to ws(s).
pub fn websocket_url(raw: &str) -> Result<Url, ChannelError> {
    let invalid = |reason: String| ChannelError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    let scheme = match url.scheme() {
        "ws" | "http" => "ws",
        "wss" | "https" => "wss",
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    };
    url.set_scheme(scheme)
        .map_err(|()| invalid(format!("cannot switch scheme to '{scheme}'")))?;
    Ok(url)
}

impl WsChannel {
    /// Connects and returns the channel plus the receiver of inbound events.
    /// The receiver closes when the socket does.
    pub async fn connect(
        server_url: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ServerEvent>), ChannelError> {
        let url = websocket_url(server_url)?;
        let (ws_stream, _) = connect_async(url.as_str()).await.map_err(|source| {
            ChannelError::Connect {
                url: url.to_string(),
                source,
            }
        })?;
        info!(url = %url, "realtime channel connected");
        let (mut ws_writer, mut ws_reader) = ws_stream.split();

        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let (inbound_tx, inbound) = mpsc::unbounded_channel::<ServerEvent>();

        // Dropped when the reader ends, which stops the writer too.
        let (reader_done, mut reader_finished) = oneshot::channel::<()>();

        let writer = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    frame = outbound_rx.recv() => {
                        let Some(frame) = frame else { break };
                        if let Err(err) = ws_writer.send(Message::Text(frame)).await {
                            warn!("websocket send failed: {err}");
                            break;
                        }
                    }
                    _ = &mut reader_finished => {
                        debug!("websocket reader finished, stopping writer");
                        break;
                    }
                }
            }
            outbound_rx.close();
            if let Err(err) = ws_writer.close().await {
                debug!("websocket close failed: {err}");
            }
        });

        let reader = tokio::spawn(async move {
            while let Some(msg) = ws_reader.next().await {
                match msg {
                    Ok(Message::Text(text)) => match ServerEvent::from_frame(&text) {
                        Ok(event) => {
                            debug!(event = event.name(), "received realtime event");
                            if inbound_tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(err) => warn!("ignoring invalid server frame: {err}"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(err) => {
                        warn!("websocket receive failed: {err}");
                        break;
                    }
                }
            }
            drop(reader_done);
            info!("realtime channel closed");
        });

        Ok((
            Self {
                outbound,
                writer,
                reader,
            },
            inbound,
        ))
    }

    /// True once the writer has stopped; every later `emit` fails with
    /// [`ChannelError::Closed`].
    pub fn is_closed(&self) -> bool {
        self.outbound.is_closed()
    }

    /// Flushes queued events, closes the socket and stops reading.
    pub async fn close(self) {
        if self.is_closed() {
            debug!("websocket writer already stopped");
        }
        let Self {
            outbound,
            writer,
            reader,
        } = self;
        drop(outbound);
        if let Err(err) = writer.await {
            warn!("websocket writer task failed: {err}");
        }
        reader.abort();
    }
}

impl RealtimeChannel for WsChannel {
    fn emit(&self, event: ClientEvent) -> Result<(), ChannelError> {
        let frame = event.to_frame()?;
        debug!(event = event.name(), "emitting realtime event");
        self.outbound
            .send(frame)
            .map_err(|_| ChannelError::Closed)
    }
}

#[cfg(test)]
#[path = "tests/ws_tests.rs"]
mod tests;

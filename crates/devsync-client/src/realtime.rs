// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket connection to the realtime endpoint.

use std::time::Duration;

use devsync_core::realtime::{ClientEvent, RelayedMessage, ServerEvent};
use devsync_core::Message;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message as Frame;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::ClientError;
use crate::session::Session;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// How long `join` waits for the server's acknowledgement.
pub const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// `http(s)://host` -> `ws(s)://host/ws?token=...`
pub fn realtime_url(base_url: &str, token: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{base}/ws?token={token}")
}

pub struct RealtimeConnection {
    url: String,
    stream: WsStream,
    project_id: Option<String>,
}

impl RealtimeConnection {
    /// Open a connection authenticated with the session token.
    pub async fn connect(base_url: &str, session: &Session) -> Result<Self, ClientError> {
        let url = realtime_url(base_url, &session.token);
        let stream = Self::open(&url).await?;
        Ok(Self {
            url,
            stream,
            project_id: None,
        })
    }

    async fn open(url: &str) -> Result<WsStream, ClientError> {
        let (stream, _response) = connect_async(url).await?;
        Ok(stream)
    }

    /// Project room this connection has joined.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    async fn emit(&mut self, event: &ClientEvent) -> Result<(), ClientError> {
        let frame = serde_json::to_string(event)?;
        self.stream.send(Frame::Text(frame.into())).await?;
        Ok(())
    }

    /// Join a project room and wait for the server to acknowledge it.
    pub async fn join(&mut self, project_id: &str) -> Result<(), ClientError> {
        self.emit(&ClientEvent::JoinProject(project_id.to_string()))
            .await?;
        loop {
            match self.next_event(JOIN_TIMEOUT).await? {
                Some(ServerEvent::Joined(joined)) if joined == project_id => {
                    self.project_id = Some(joined);
                    return Ok(());
                }
                Some(ServerEvent::Error(err)) => {
                    return Err(ClientError::Api(devsync_core::DevsyncError::Forbidden(
                        err.message,
                    )));
                }
                Some(other) => {
                    tracing::debug!(?other, "skipping event while joining");
                }
                None => return Err(ClientError::Unavailable("join not acknowledged".into())),
            }
        }
    }

    pub async fn leave(&mut self) -> Result<(), ClientError> {
        self.emit(&ClientEvent::LeaveProject).await?;
        self.project_id = None;
        Ok(())
    }

    /// Relay a message the server already stored to the rest of the room.
    pub async fn emit_message(&mut self, message: &Message) -> Result<(), ClientError> {
        self.emit(&ClientEvent::ProjectMessage(RelayedMessage {
            project_id: message.project_id.clone(),
            message: message.clone(),
        }))
        .await
    }

    /// Next server event, or `None` if nothing arrives within `wait`.
    pub async fn next_event(&mut self, wait: Duration) -> Result<Option<ServerEvent>, ClientError> {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let frame = match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Err(_) => return Ok(None),
                Ok(None) => return Err(ClientError::Unavailable("connection closed".into())),
                Ok(Some(frame)) => frame?,
            };
            match frame {
                Frame::Text(text) => return Ok(Some(serde_json::from_str(text.as_str())?)),
                Frame::Close(_) => return Err(ClientError::Unavailable("connection closed".into())),
                _ => continue,
            }
        }
    }

    /// Tear down the current socket and join `project_id` on a fresh one,
    /// so no event from the previous room can arrive afterwards.
    pub async fn switch_project(&mut self, project_id: &str) -> Result<(), ClientError> {
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!(error = %e, "closing previous realtime socket failed");
        }
        self.project_id = None;
        self.stream = Self::open(&self.url).await?;
        self.join(project_id).await
    }

    pub async fn close(mut self) -> Result<(), ClientError> {
        self.stream.close(None).await?;
        Ok(())
    }
}

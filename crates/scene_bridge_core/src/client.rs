use crate::types::Reply;
use crate::{Result, SceneConfig, SceneError};
use std::future::Future;
use tokio::time::timeout;
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

/// One request, one reply. `&mut self` keeps a single transaction in flight.
pub trait Transport {
    fn execute(&mut self, wire: &str) -> impl Future<Output = Result<Reply>>;
}

/// Lockstep REQ channel to the scene service.
///
/// The socket is owned exclusively by the session and released on
/// [`Session::close`] or on drop. Once a transaction fails part-way the REQ
/// state machine can no longer be trusted, so the session refuses further
/// requests instead of sending out of step.
pub struct Session {
    config: SceneConfig,
    socket: ReqSocket,
    sequence: u64,
    desynchronized: bool,
}

impl Session {
    /// Open the channel. The transport keeps retrying an unreachable peer, so
    /// `TransportFailure` only covers an endpoint it cannot use at all (bad
    /// address, unsupported scheme). With `config.timeout` unset, connecting to
    /// a peer that never answers waits forever; set it to get `Timeout` instead.
    pub async fn connect(config: SceneConfig) -> Result<Self> {
        let mut socket = ReqSocket::new();

        tracing::info!("Connecting to scene service at {}", config.endpoint);

        let connected = match config.timeout {
            Some(limit) => timeout(limit, socket.connect(&config.endpoint))
                .await
                .map_err(|_| SceneError::Timeout(limit))?,
            None => socket.connect(&config.endpoint).await,
        };
        connected.map_err(|e| {
            SceneError::TransportFailure(format!("cannot connect to {}: {}", config.endpoint, e))
        })?;

        tracing::debug!("Connected to {}", config.endpoint);

        Ok(Self {
            config,
            socket,
            sequence: 0,
            desynchronized: false,
        })
    }

    pub async fn execute(&mut self, wire: &str) -> Result<Reply> {
        if self.desynchronized {
            return Err(SceneError::TransportFailure(
                "session desynchronized by an earlier failed transaction".into(),
            ));
        }

        self.sequence += 1;
        let seq = self.sequence;

        tracing::debug!("Sending command: seq={}, wire={}", seq, wire);

        let result = match self.config.timeout {
            Some(limit) => match timeout(limit, self.round_trip(wire)).await {
                Ok(result) => result,
                Err(_) => Err(SceneError::Timeout(limit)),
            },
            None => self.round_trip(wire).await,
        };

        match &result {
            Ok(reply) => {
                tracing::debug!("Reply received: seq={}, bytes={}", seq, reply.payload.len())
            }
            Err(e) => {
                self.desynchronized = true;
                tracing::warn!("Transaction failed: seq={}, error={}", seq, e);
            }
        }
        result
    }

    async fn round_trip(&mut self, wire: &str) -> Result<Reply> {
        self.socket
            .send(ZmqMessage::from(wire.as_bytes().to_vec()))
            .await?;
        let message = self.socket.recv().await?;
        Ok(Reply::new(message.into_vec().concat()))
    }

    /// Release the channel. Errors while closing are logged and reported.
    pub async fn close(self) -> Result<()> {
        tracing::debug!(
            "Closing session to {} after {} transactions",
            self.config.endpoint,
            self.sequence
        );
        let errors = self.socket.close().await;
        if errors.is_empty() {
            return Ok(());
        }
        for e in &errors {
            tracing::warn!("Error while closing session: {}", e);
        }
        Err(SceneError::TransportFailure(format!(
            "{} error(s) while closing session",
            errors.len()
        )))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Number of transactions attempted so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_desynchronized(&self) -> bool {
        self.desynchronized
    }
}

impl Transport for Session {
    async fn execute(&mut self, wire: &str) -> Result<Reply> {
        Session::execute(self, wire).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_endpoint() {
        let result = Session::connect(SceneConfig::new("not-an-endpoint")).await;
        match result {
            Err(SceneError::TransportFailure(msg)) => assert!(msg.contains("not-an-endpoint")),
            Err(other) => panic!("Expected TransportFailure, got {other}"),
            Ok(_) => panic!("Expected connect to fail"),
        }
    }
}

use crate::types::Reply;
use crate::{Result, SceneError, Transport};

/// Records every wire line and acknowledges with `ack <index>`.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub sent: Vec<String>,
    pub fail_at: Option<usize>,
    in_flight: bool,
}

impl RecordingTransport {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }
}

impl Transport for RecordingTransport {
    async fn execute(&mut self, wire: &str) -> Result<Reply> {
        assert!(!self.in_flight, "transaction started before previous reply");
        self.in_flight = true;
        let index = self.sent.len();
        self.sent.push(wire.to_string());
        tokio::task::yield_now().await;
        self.in_flight = false;

        if self.fail_at == Some(index) {
            return Err(SceneError::TransportFailure("peer went away".into()));
        }
        Ok(Reply::new(format!("ack {index}")))
    }
}

use crate::types::{Command, Reply};
use crate::{Result, Transport};

/// Empties the remote scene. Every id becomes free for `createObject` again.
pub async fn clear<T: Transport>(transport: &mut T) -> Result<Reply> {
    super::send(transport, &Command::clear()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use crate::SceneError;

    #[tokio::test]
    async fn test_clear_is_bare_verb() {
        let mut transport = RecordingTransport::default();
        clear(&mut transport).await.unwrap();
        assert_eq!(transport.sent, vec!["clear"]);
    }

    #[tokio::test]
    async fn test_clear_surfaces_transport_failure() {
        let mut transport = RecordingTransport::failing_at(0);
        let err = clear(&mut transport).await.unwrap_err();
        assert!(matches!(err, SceneError::TransportFailure(_)));
    }
}

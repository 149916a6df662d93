use crate::types::Reply;
use crate::{grammar, Result, Transport};

/// Send a hand-written line. It is parsed and re-encoded first, so a typo is
/// caught here instead of by the service and padding never reaches the wire.
pub async fn raw<T: Transport>(transport: &mut T, wire: &str) -> Result<Reply> {
    let line = grammar::encode(&grammar::decode(wire)?)?;
    transport.execute(&line).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use crate::SceneError;

    #[tokio::test]
    async fn test_raw_sends_canonical_line() {
        let mut transport = RecordingTransport::default();
        raw(&mut transport, "manipulateObject;sphere3;translate; 0.3, 0.0, 2.0\n")
            .await
            .unwrap();
        assert_eq!(transport.sent, vec!["manipulateObject;sphere3;translate;0.3,0.0,2.0"]);
    }

    #[tokio::test]
    async fn test_raw_strips_padding_around_verb() {
        let mut transport = RecordingTransport::default();
        raw(&mut transport, "  render ").await.unwrap();
        raw(&mut transport, " deleteObject ; sphere1 \r\n").await.unwrap();
        assert_eq!(transport.sent, vec!["render", "deleteObject;sphere1"]);
    }

    #[tokio::test]
    async fn test_raw_rejects_unknown_verb() {
        let mut transport = RecordingTransport::default();
        let err = raw(&mut transport, "setmaterial;sphere2;blank").await.unwrap_err();
        assert!(matches!(err, SceneError::InvalidVerb(_)));
        assert!(transport.sent.is_empty());
    }
}

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Acknowledgement payload for one command. The service owns its format, so
/// the bytes are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub payload: Vec<u8>,
}

impl Reply {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }

    /// Printable form for logs and reports: the text itself when the payload
    /// is UTF-8, `base64:`-prefixed otherwise.
    pub fn printable(&self) -> String {
        match self.as_text() {
            Some(text) => text.to_string(),
            None => format!("base64:{}", BASE64.encode(&self.payload)),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.printable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_reply() {
        let reply = Reply::new("ok");
        assert_eq!(reply.as_text(), Some("ok"));
        assert_eq!(reply.printable(), "ok");
        assert!(!reply.is_empty());
    }

    #[test]
    fn test_binary_reply_prints_base64() {
        let reply = Reply::new(vec![0x00, 0x01, 0x02, 0xFF, 0xFE]);
        assert_eq!(reply.as_text(), None);
        assert_eq!(reply.to_string(), "base64:AAEC//4=");
    }

    #[test]
    fn test_empty_reply() {
        let reply = Reply::default();
        assert!(reply.is_empty());
        assert_eq!(reply.printable(), "");
    }
}

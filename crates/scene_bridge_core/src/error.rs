use std::time::Duration;
use thiserror::Error;

use crate::runner::RunError;
use crate::types::Verb;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid verb: {0:?}")]
    InvalidVerb(String),

    #[error("Missing field '{field}' for {verb}")]
    MissingField { verb: Verb, field: &'static str },

    #[error("Unexpected field '{field}' for {verb}")]
    UnexpectedField { verb: Verb, field: &'static str },

    #[error("Invalid {field} {value:?}: contains a reserved separator")]
    InvalidField { field: &'static str, value: String },

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<SceneError>,
    },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Run(Box<RunError>),
}

impl From<zeromq::ZmqError> for SceneError {
    fn from(err: zeromq::ZmqError) -> Self {
        Self::TransportFailure(err.to_string())
    }
}

impl SceneError {
    pub fn missing(verb: Verb, field: &'static str) -> Self {
        Self::MissingField { verb, field }
    }

    pub fn unexpected(verb: Verb, field: &'static str) -> Self {
        Self::UnexpectedField { verb, field }
    }

    pub fn at_line(line: usize, source: SceneError) -> Self {
        Self::Script {
            line,
            source: Box::new(source),
        }
    }

    /// True for failures caught before anything reached the wire.
    pub fn is_local(&self) -> bool {
        match self {
            Self::InvalidVerb(_)
            | Self::MissingField { .. }
            | Self::UnexpectedField { .. }
            | Self::InvalidField { .. } => true,
            Self::Script { source, .. } => source.is_local(),
            Self::Run(err) => err.source.is_local(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let timeout_err = SceneError::Timeout(Duration::from_secs(5));
        assert_eq!(timeout_err.to_string(), "Request timeout after 5s");

        let verb_err = SceneError::InvalidVerb("explode".into());
        assert_eq!(verb_err.to_string(), "Invalid verb: \"explode\"");

        let missing = SceneError::missing(Verb::ManipulateObject, "property");
        assert_eq!(
            missing.to_string(),
            "Missing field 'property' for manipulateObject"
        );

        let transport = SceneError::TransportFailure("connection refused".into());
        assert_eq!(transport.to_string(), "Transport failure: connection refused");
    }

    #[test]
    fn test_script_error_wraps_line() {
        let err = SceneError::at_line(7, SceneError::InvalidVerb("nope".into()));
        assert_eq!(err.to_string(), "Script line 7: Invalid verb: \"nope\"");
        assert!(err.is_local());
    }

    #[test]
    fn test_local_classification() {
        assert!(SceneError::unexpected(Verb::Render, "targetId").is_local());
        assert!(!SceneError::Timeout(Duration::from_millis(1)).is_local());
        assert!(!SceneError::TransportFailure("gone".into()).is_local());
    }

    #[test]
    fn test_deserialize_error_conversion() {
        let json_err =
            serde_json::Error::io(std::io::Error::new(std::io::ErrorKind::Other, "test"));
        let err: SceneError = json_err.into();
        assert!(matches!(err, SceneError::Deserialize(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SceneError = io_err.into();
        match err {
            SceneError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected Io variant"),
        }
    }
}

use serde::Serialize;
use thiserror::Error;

use crate::types::{Command, Reply};
use crate::{grammar, Result, SceneConfig, SceneError, Session, Transport};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub index: usize,
    pub wire: String,
    #[serde(serialize_with = "printable_reply")]
    pub reply: Reply,
}

fn printable_reply<S>(reply: &Reply, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&reply.printable())
}

/// Everything the service acknowledged, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub transactions: Vec<Transaction>,
}

impl RunReport {
    pub fn executed(&self) -> usize {
        self.transactions.len()
    }
}

/// The command that stopped a run. Commands before `index` were acknowledged
/// and stay applied on the remote side; `completed` holds their replies.
#[derive(Error, Debug)]
#[error("command #{index} `{command}` failed: {source}")]
pub struct RunError {
    pub index: usize,
    /// Wire text, or the debug form when the command could not be encoded.
    pub command: String,
    #[source]
    pub source: SceneError,
    pub completed: RunReport,
}

/// Execute `commands` strictly in order, one transaction at a time, stopping
/// at the first failure. Nothing is skipped or retried: the remote scene graph
/// only stays consistent if commands land in the order they were written.
pub async fn run<T: Transport>(
    commands: &[Command],
    transport: &mut T,
) -> std::result::Result<RunReport, RunError> {
    let mut report = RunReport::default();

    tracing::info!("Running {} commands", commands.len());

    for (index, command) in commands.iter().enumerate() {
        let wire = match grammar::encode(command) {
            Ok(wire) => wire,
            Err(source) => {
                tracing::warn!("Command #{} could not be encoded: {}", index, source);
                return Err(RunError {
                    index,
                    command: format!("{command:?}"),
                    source,
                    completed: report,
                });
            }
        };

        match transport.execute(&wire).await {
            Ok(reply) => {
                tracing::debug!("Command #{} acknowledged: {} -> {}", index, wire, reply);
                report.transactions.push(Transaction { index, wire, reply });
            }
            Err(source) => {
                tracing::warn!("Command #{} failed: {} ({})", index, wire, source);
                return Err(RunError {
                    index,
                    command: wire,
                    source,
                    completed: report,
                });
            }
        }
    }

    tracing::info!("Run complete: {} commands acknowledged", report.executed());
    Ok(report)
}

/// Connect, run, and close the session on every path.
pub async fn run_script(config: SceneConfig, commands: &[Command]) -> Result<RunReport> {
    let mut session = Session::connect(config).await?;
    let outcome = run(commands, &mut session).await;

    if let Err(e) = session.close().await {
        tracing::warn!("Session did not close cleanly: {}", e);
    }

    outcome.map_err(|e| SceneError::Run(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use crate::types::Verb;

    fn scene() -> Vec<Command> {
        vec![
            Command::create("cam1", "camera"),
            Command::translate("cam1", [0.0, 0.0, 0.0]),
            Command::create("sphere1", "sphere"),
            Command::render(),
        ]
    }

    #[tokio::test]
    async fn test_run_sends_every_command_in_order() {
        let mut transport = RecordingTransport::default();
        let report = run(&scene(), &mut transport).await.unwrap();

        assert_eq!(
            transport.sent,
            vec![
                "createObject;cam1;camera",
                "manipulateObject;cam1;translate;0.0,0.0,0.0",
                "createObject;sphere1;sphere",
                "render",
            ]
        );
        assert_eq!(report.executed(), 4);
        for (i, tx) in report.transactions.iter().enumerate() {
            assert_eq!(tx.index, i);
            assert_eq!(tx.reply.as_text(), Some(format!("ack {i}").as_str()));
        }
    }

    #[tokio::test]
    async fn test_run_stops_on_transport_failure() {
        let mut transport = RecordingTransport::failing_at(1);
        let err = run(&scene(), &mut transport).await.unwrap_err();

        assert_eq!(err.index, 1);
        assert_eq!(err.command, "manipulateObject;cam1;translate;0.0,0.0,0.0");
        assert!(matches!(err.source, SceneError::TransportFailure(_)));
        assert_eq!(err.completed.executed(), 1);
        // Command #2 was never attempted.
        assert_eq!(transport.sent.len(), 2);
    }

    #[tokio::test]
    async fn test_run_stops_before_sending_invalid_command() {
        let mut commands = scene();
        commands[2].object_type = None;

        let mut transport = RecordingTransport::default();
        let err = run(&commands, &mut transport).await.unwrap_err();

        assert_eq!(err.index, 2);
        assert!(err.command.contains("CreateObject"));
        assert!(matches!(
            err.source,
            SceneError::MissingField { verb: Verb::CreateObject, field: "objectType" }
        ));
        assert_eq!(transport.sent.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_first_command_sends_nothing() {
        let mut bad = Command::render();
        bad.target_id = Some("cam1".into());

        let mut transport = RecordingTransport::default();
        let err = run(&[bad, Command::clear()], &mut transport).await.unwrap_err();
        assert_eq!(err.index, 0);
        assert!(transport.sent.is_empty());
        assert_eq!(
            err.to_string(),
            format!("command #0 `{}` failed: Unexpected field 'targetId' for render", err.command)
        );
    }

    #[test]
    fn test_report_serializes_printable_replies() {
        let report = RunReport {
            transactions: vec![Transaction {
                index: 0,
                wire: "render".into(),
                reply: Reply::new("done"),
            }],
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "transactions": [{ "index": 0, "wire": "render", "reply": "done" }]
            })
        );
    }

    #[tokio::test]
    async fn test_empty_run() {
        let mut transport = RecordingTransport::default();
        let report = run(&[], &mut transport).await.unwrap();
        assert_eq!(report, RunReport::default());
        assert!(transport.sent.is_empty());
    }
}

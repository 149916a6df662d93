//! Scripts as data: an ordered list of commands that can be loaded, printed,
//! diffed and replayed without a connection.
//!
//! Two on-disk formats are understood:
//!
//! * wire lines, one encoded command per line, with `#` comments and blank
//!   lines ignored;
//! * JSON, `{"name": "...", "commands": [{"verb": "createObject", ...}]}`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::Command;
use crate::{grammar, Result, SceneError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub name: String,
    pub commands: Vec<Command>,
}

impl Script {
    pub fn new(name: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn from_wire_lines(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut commands = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let command = grammar::decode(trimmed).map_err(|e| SceneError::at_line(idx + 1, e))?;
            commands.push(command);
        }
        Ok(Self::new(name, commands))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Pick the format from the extension: `.json` is JSON, anything else is
    /// wire lines. The file stem becomes the name when the file has none.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut script = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_wire_lines(stem.clone(), &text)?
        };
        if script.name.is_empty() {
            script.name = stem;
        }

        tracing::debug!(
            "Loaded script '{}' from {} ({} commands)",
            script.name,
            path.display(),
            script.len()
        );
        Ok(script)
    }

    /// Encode every command, one per line. Fails on the first command that
    /// cannot be encoded.
    pub fn to_wire_lines(&self) -> Result<String> {
        let mut out = String::new();
        for command in &self.commands {
            out.push_str(&grammar::encode(command)?);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SceneError;

/// Operation keyword at the start of every wire message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verb {
    CreateObject,
    ManipulateObject,
    DeleteObject,
    Render,
    Clear,
}

impl Verb {
    pub const ALL: [Verb; 5] = [
        Verb::CreateObject,
        Verb::ManipulateObject,
        Verb::DeleteObject,
        Verb::Render,
        Verb::Clear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::CreateObject => "createObject",
            Verb::ManipulateObject => "manipulateObject",
            Verb::DeleteObject => "deleteObject",
            Verb::Render => "render",
            Verb::Clear => "clear",
        }
    }

    pub fn takes_target(self) -> bool {
        !matches!(self, Verb::Render | Verb::Clear)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| SceneError::InvalidVerb(s.to_string()))
    }
}

/// One token of a `manipulateObject` argument list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Number(f64),
    Text(String),
}

impl Argument {
    /// Finite decimals become numbers, everything else stays text.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Argument::Number(value),
            _ => Argument::Text(token.to_string()),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Argument::Number(_))
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers keep one decimal so 0 goes out as `0.0`.
            Argument::Number(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Argument::Number(v) => write!(f, "{v}"),
            Argument::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Number(value)
    }
}

impl From<f32> for Argument {
    fn from(value: f32) -> Self {
        Argument::Number(f64::from(value))
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Text(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Text(value)
    }
}

/// A single operation request. Lives for one round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub verb: Verb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
}

impl Command {
    fn bare(verb: Verb) -> Self {
        Self {
            verb,
            target_id: None,
            object_type: None,
            property: None,
            arguments: Vec::new(),
        }
    }

    pub fn create(target_id: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            target_id: Some(target_id.into()),
            object_type: Some(object_type.into()),
            ..Self::bare(Verb::CreateObject)
        }
    }

    pub fn manipulate<I, A>(target_id: impl Into<String>, property: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        Self {
            target_id: Some(target_id.into()),
            property: Some(property.into()),
            arguments: args.into_iter().map(Into::into).collect(),
            ..Self::bare(Verb::ManipulateObject)
        }
    }

    pub fn delete(target_id: impl Into<String>) -> Self {
        Self {
            target_id: Some(target_id.into()),
            ..Self::bare(Verb::DeleteObject)
        }
    }

    pub fn render() -> Self {
        Self::bare(Verb::Render)
    }

    pub fn clear() -> Self {
        Self::bare(Verb::Clear)
    }

    pub fn translate(target_id: impl Into<String>, xyz: [f64; 3]) -> Self {
        Self::manipulate(target_id, "translate", xyz)
    }

    pub fn spin(target_id: impl Into<String>, xyz: [f64; 3]) -> Self {
        Self::manipulate(target_id, "spin", xyz)
    }

    pub fn color(target_id: impl Into<String>, rgb: [f64; 3]) -> Self {
        Self::manipulate(target_id, "color", rgb)
    }

    pub fn radius(target_id: impl Into<String>, radius: f64) -> Self {
        Self::manipulate(target_id, "radius", [radius])
    }

    pub fn material_parameter(
        target_id: impl Into<String>,
        name: impl Into<String>,
        values: [f64; 3],
    ) -> Self {
        let mut arguments = vec![Argument::Text(name.into())];
        arguments.extend(values.into_iter().map(Argument::Number));
        Self {
            target_id: Some(target_id.into()),
            property: Some("setMaterialParameter".to_string()),
            arguments,
            ..Self::bare(Verb::ManipulateObject)
        }
    }
}

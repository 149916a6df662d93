//! Wire grammar: one [`Command`] per `;`-separated line.
//!
//! ```text
//! createObject;cam1;camera
//! manipulateObject;cam2;spin;-45.0,0.0,0.0
//! manipulateObject;sphere2;setMaterialParameter;Ks;1.0,1.0,1.0
//! deleteObject;sphere1
//! render
//! clear
//! ```
//!
//! Only structure is validated here. Argument counts and value ranges belong
//! to the remote service.

use crate::types::{Argument, Command, Verb};
use crate::{Result, SceneError};

pub const FIELD_SEPARATOR: &str = ";";
pub const ARGUMENT_SEPARATOR: &str = ",";

const RESERVED: [char; 4] = [';', ',', '\n', '\r'];

/// Encode a command as its wire string. Fails before anything is sent when a
/// required field is missing or a field would break framing.
pub fn encode(command: &Command) -> Result<String> {
    let verb = command.verb;
    let mut fields: Vec<String> = vec![verb.as_str().to_string()];

    if verb.takes_target() {
        fields.push(required(verb, "targetId", &command.target_id)?);
    } else {
        reject(verb, "targetId", command.target_id.is_some())?;
    }

    match verb {
        Verb::CreateObject => {
            fields.push(required(verb, "objectType", &command.object_type)?);
            reject(verb, "property", command.property.is_some())?;
            reject(verb, "arguments", !command.arguments.is_empty())?;
        }
        Verb::ManipulateObject => {
            fields.push(required(verb, "property", &command.property)?);
            reject(verb, "objectType", command.object_type.is_some())?;
            fields.extend(encode_arguments(&command.arguments)?);
        }
        Verb::DeleteObject | Verb::Render | Verb::Clear => reject_trailing(command)?,
    }

    Ok(fields.join(FIELD_SEPARATOR))
}

/// Parse a wire string back into a command. Surrounding whitespace on each
/// field and token is ignored.
pub fn decode(line: &str) -> Result<Command> {
    let mut fields = line.trim_end_matches(['\r', '\n']).split(FIELD_SEPARATOR).map(str::trim);
    let verb: Verb = fields.next().unwrap_or_default().parse()?;

    let command = match verb {
        Verb::CreateObject => {
            let target_id = next_required(verb, "targetId", &mut fields)?;
            let object_type = next_required(verb, "objectType", &mut fields)?;
            Command::create(target_id, object_type)
        }
        Verb::ManipulateObject => {
            let target_id = next_required(verb, "targetId", &mut fields)?;
            let property = next_required(verb, "property", &mut fields)?;
            let rest: Vec<&str> = fields.by_ref().collect();
            Command {
                arguments: decode_arguments(&rest)?,
                ..Command::manipulate(target_id, property, Vec::<Argument>::new())
            }
        }
        Verb::DeleteObject => Command::delete(next_required(verb, "targetId", &mut fields)?),
        Verb::Render => Command::render(),
        Verb::Clear => Command::clear(),
    };

    if fields.next().is_some() {
        return Err(SceneError::unexpected(verb, "trailing field"));
    }
    Ok(command)
}

fn required(verb: Verb, field: &'static str, value: &Option<String>) -> Result<String> {
    match value.as_deref() {
        None | Some("") => Err(SceneError::missing(verb, field)),
        Some(value) => {
            check_reserved(field, value)?;
            Ok(value.to_string())
        }
    }
}

fn reject(verb: Verb, field: &'static str, present: bool) -> Result<()> {
    if present {
        Err(SceneError::unexpected(verb, field))
    } else {
        Ok(())
    }
}

fn reject_trailing(command: &Command) -> Result<()> {
    reject(command.verb, "objectType", command.object_type.is_some())?;
    reject(command.verb, "property", command.property.is_some())?;
    reject(command.verb, "arguments", !command.arguments.is_empty())
}

fn check_reserved(field: &'static str, value: &str) -> Result<()> {
    if value.contains(RESERVED) {
        return Err(SceneError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// The trailing run of numbers shares one comma-joined field; every token in
/// front of it gets a field of its own. A list ending in text puts that last
/// text token alone in the final field.
fn encode_arguments(arguments: &[Argument]) -> Result<Vec<String>> {
    for arg in arguments {
        if let Argument::Text(text) = arg {
            if text.is_empty() {
                return Err(SceneError::InvalidField {
                    field: "argument",
                    value: String::new(),
                });
            }
            check_reserved("argument", text)?;
        }
    }

    let Some(last) = arguments.last() else {
        return Ok(Vec::new());
    };

    let tail_start = if last.is_number() {
        arguments
            .iter()
            .rposition(|arg| !arg.is_number())
            .map_or(0, |idx| idx + 1)
    } else {
        arguments.len() - 1
    };

    let mut fields: Vec<String> = arguments[..tail_start].iter().map(ToString::to_string).collect();
    let tail: Vec<String> = arguments[tail_start..].iter().map(ToString::to_string).collect();
    fields.push(tail.join(ARGUMENT_SEPARATOR));
    Ok(fields)
}

fn decode_arguments(fields: &[&str]) -> Result<Vec<Argument>> {
    if matches!(fields, [] | [""]) {
        return Ok(Vec::new());
    }

    let mut arguments = Vec::new();
    for field in fields {
        for token in field.split(ARGUMENT_SEPARATOR).map(str::trim) {
            if token.is_empty() {
                return Err(SceneError::InvalidField {
                    field: "argument",
                    value: field.to_string(),
                });
            }
            arguments.push(Argument::parse(token));
        }
    }
    Ok(arguments)
}

fn next_required<'a>(
    verb: Verb,
    field: &'static str,
    fields: &mut impl Iterator<Item = &'a str>,
) -> Result<&'a str> {
    match fields.next() {
        None | Some("") => Err(SceneError::missing(verb, field)),
        Some(value) => Ok(value),
    }
}

//! Offline check of a command sequence against the service's scene-graph
//! rules. Nothing here touches the network; a run is never blocked by lint on
//! its own.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::grammar;
use crate::types::{Argument, Command, Verb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub index: usize,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "#{} {}: {}", self.index, level, self.message)
    }
}

pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}

enum Shape {
    Numbers(usize),
    NamedNumbers,
}

fn expected_shape(property: &str) -> Option<Shape> {
    const TRIPLES: [&str; 6] = ["translate", "spin", "move", "rotate", "setPosition", "color"];
    const SCALARS: [&str; 4] = ["radius", "setRadius", "decayRadius", "setDecayRadius"];
    const NAMED: [&str; 2] = ["setMaterialParameter", "materialParameter"];

    let matches = |names: &[&str]| names.iter().any(|n| n.eq_ignore_ascii_case(property));
    if matches(&TRIPLES) {
        Some(Shape::Numbers(3))
    } else if matches(&SCALARS) {
        Some(Shape::Numbers(1))
    } else if matches(&NAMED) {
        Some(Shape::NamedNumbers)
    } else {
        None
    }
}

fn check_arity(property: &str, args: &[Argument]) -> Option<String> {
    let all_numbers = |args: &[Argument]| args.iter().all(Argument::is_number);
    match expected_shape(property)? {
        Shape::Numbers(n) if args.len() != n || !all_numbers(args) => Some(format!(
            "'{property}' expects {n} number(s), got {}",
            args.len()
        )),
        Shape::NamedNumbers => match args.split_first() {
            Some((Argument::Text(_), rest)) if !rest.is_empty() && all_numbers(rest) => None,
            _ => Some(format!("'{property}' expects a parameter name followed by numbers")),
        },
        _ => None,
    }
}

/// Replay `commands` against a local model of the scene graph and report
/// anything the service would reject or that looks like a mistake.
pub fn lint(commands: &[Command]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut scene: HashMap<&str, &str> = HashMap::new();

    let mut push = |index: usize, severity: Severity, message: String| {
        findings.push(Finding {
            index,
            severity,
            message,
        })
    };

    for (index, command) in commands.iter().enumerate() {
        if let Err(e) = grammar::encode(command) {
            push(index, Severity::Error, e.to_string());
            continue;
        }

        let id = command.target_id.as_deref().unwrap_or_default();
        match command.verb {
            Verb::CreateObject => {
                let object_type = command.object_type.as_deref().unwrap_or_default();
                // A rejected create leaves the original object in place.
                match scene.entry(id) {
                    Entry::Occupied(existing) => push(
                        index,
                        Severity::Error,
                        format!("'{id}' already exists (a {})", existing.get()),
                    ),
                    Entry::Vacant(slot) => {
                        slot.insert(object_type);
                    }
                }
            }
            Verb::ManipulateObject => {
                if !scene.contains_key(id) {
                    push(index, Severity::Error, format!("'{id}' manipulated before it was created"));
                }
                let property = command.property.as_deref().unwrap_or_default();
                if let Some(message) = check_arity(property, &command.arguments) {
                    push(index, Severity::Warning, message);
                }
            }
            Verb::DeleteObject => {
                if scene.remove(id).is_none() {
                    push(index, Severity::Error, format!("'{id}' deleted but does not exist"));
                }
            }
            Verb::Render => {
                if !scene.values().any(|t| t.eq_ignore_ascii_case("camera")) {
                    push(index, Severity::Warning, "render with no camera in the scene".into());
                }
            }
            Verb::Clear => scene.clear(),
        }
    }

    findings
}

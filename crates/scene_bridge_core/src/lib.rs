//! Scene Bridge Core
//!
//! A small async library for driving a remote 3D scene service over its
//! semicolon-delimited command protocol on a ZeroMQ REQ/REP channel.
//! Provides structured config, error handling, the command grammar, a lockstep
//! session, and a fail-fast script runner.

pub mod config;
pub mod error;
pub mod grammar;
pub mod client;
pub mod ops;
pub mod types;
pub mod script;
pub mod runner;
pub mod lint;
pub mod scenarios;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::SceneConfig;
pub use error::SceneError;
pub use client::{Session, Transport};
pub use runner::{run, run_script, RunError, RunReport};
pub use script::Script;
pub use types::{Argument, Command, Reply, Verb};

/// Result type alias using SceneError
pub type Result<T> = std::result::Result<T, SceneError>;

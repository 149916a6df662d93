//! One helper per remote operation. Each builds a [`Command`], encodes it
//! (validation happens before anything is sent) and runs one transaction.

pub mod clear;
pub mod create;
pub mod delete;
pub mod manipulate;
pub mod raw;
pub mod render;

use crate::types::{Command, Reply};
use crate::{grammar, Result, Transport};

pub(crate) async fn send<T: Transport>(transport: &mut T, command: &Command) -> Result<Reply> {
    let wire = grammar::encode(command)?;
    transport.execute(&wire).await
}

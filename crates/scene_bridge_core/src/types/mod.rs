mod command;
mod reply;

pub use command::{Argument, Command, Verb};
pub use reply::Reply;

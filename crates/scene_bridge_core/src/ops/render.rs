use crate::types::{Command, Reply};
use crate::{Result, Transport};

pub async fn render<T: Transport>(transport: &mut T) -> Result<Reply> {
    super::send(transport, &Command::render()).await
}

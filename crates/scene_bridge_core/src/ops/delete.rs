use crate::types::{Command, Reply};
use crate::{Result, Transport};

pub async fn delete_object<T: Transport>(transport: &mut T, target_id: &str) -> Result<Reply> {
    super::send(transport, &Command::delete(target_id)).await
}

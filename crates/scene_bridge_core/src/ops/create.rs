use crate::types::{Command, Reply};
use crate::{Result, Transport};

pub async fn create_object<T: Transport>(
    transport: &mut T,
    target_id: &str,
    object_type: &str,
) -> Result<Reply> {
    super::send(transport, &Command::create(target_id, object_type)).await
}

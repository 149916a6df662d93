use crate::types::{Argument, Command, Reply};
use crate::{Result, Transport};

/// Argument content is passed through untouched; the service decides whether
/// the count and values make sense for `property`.
pub async fn manipulate_object<T, I, A>(
    transport: &mut T,
    target_id: &str,
    property: &str,
    arguments: I,
) -> Result<Reply>
where
    T: Transport,
    I: IntoIterator<Item = A>,
    A: Into<Argument>,
{
    super::send(transport, &Command::manipulate(target_id, property, arguments)).await
}

pub async fn set_material_parameter<T: Transport>(
    transport: &mut T,
    target_id: &str,
    name: &str,
    values: [f64; 3],
) -> Result<Reply> {
    super::send(transport, &Command::material_parameter(target_id, name, values)).await
}

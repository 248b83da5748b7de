//! Block storage schemas.

pub mod volume;

use coreapi_define::SchemaRegistryBuilder;

/// Registers every storage schema.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    volume::register(builder);
}

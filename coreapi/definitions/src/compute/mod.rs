//! Compute service schemas.

pub mod instance;
pub mod maintenance;
pub mod platform;
pub mod pools;

use coreapi_define::SchemaRegistryBuilder;

/// Registers every compute schema.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    platform::register(builder);
    instance::register(builder);
    maintenance::register(builder);
    pools::register(builder);
}

//! Virtual networking schemas.

pub mod drg;
pub mod fastconnect;
pub mod ipsec;

use coreapi_define::SchemaRegistryBuilder;

/// Registers every networking schema.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    drg::register(builder);
    ipsec::register(builder);
    fastconnect::register(builder);
}

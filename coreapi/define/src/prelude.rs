//! Convenient re-exports for writing schema definitions.
//!
//! ```
//! use coreapi_define::prelude::*;
//!
//! let record = RecordDescriptor::new("Vcn")
//!     .field(FieldDescriptor::body("id", ValueKind::string()).required());
//! assert_eq!(record.fields.len(), 1);
//! ```

pub use crate::enums::EnumDescriptor;
pub use crate::field::{FieldDescriptor, Location, ValueKind};
pub use crate::record::{Polymorphism, RecordDescriptor};
pub use crate::registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use crate::types::{Operation, RestMethod};

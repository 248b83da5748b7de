//! The schema registry.
//!
//! A [`SchemaRegistry`] is assembled once through a [`SchemaRegistryBuilder`],
//! checked for consistency as a whole, and then frozen. It is read-only after
//! that and safe to share across threads.
//!
//! ## Examples
//!
//! ```
//! use coreapi_define::{
//!     EnumDescriptor, FieldDescriptor, Polymorphism, RecordDescriptor, SchemaRegistry,
//!     ValueKind, VariantResolution,
//! };
//!
//! let mut builder = SchemaRegistry::builder();
//! builder
//!     .enumeration(EnumDescriptor::new("ShapeType", ["VM", "BM"]))
//!     .record(
//!         RecordDescriptor::new("Shape").polymorphic(
//!             Polymorphism::new("type")
//!                 .discriminator_enum("ShapeType")
//!                 .variant("VM", "VmShape")
//!                 .variant("BM", "BmShape"),
//!         ),
//!     )
//!     .record(RecordDescriptor::new("VmShape").variant_of("Shape", "type", "VM"))
//!     .record(
//!         RecordDescriptor::new("BmShape")
//!             .variant_of("Shape", "type", "BM")
//!             .field(FieldDescriptor::body("cores", ValueKind::int32())),
//!     );
//! let registry = builder.build().unwrap();
//!
//! let base = registry.lookup("Shape").unwrap();
//! match registry.resolve_variant(base, "bm").unwrap() {
//!     VariantResolution::Known { tag, record } => {
//!         assert_eq!(tag, "BM");
//!         assert_eq!(record.name, "BmShape");
//!     }
//!     VariantResolution::Unrecognized => unreachable!(),
//! }
//! ```

use std::collections::BTreeMap;

use crate::enums::{EnumDescriptor, EnumRegistry};
use crate::error::SchemaError;
use crate::record::RecordDescriptor;
use crate::types::Operation;
use crate::validation;

/// Outcome of dispatching a discriminator value through a variant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantResolution<'a> {
    /// The tag names a registered variant.
    Known {
        /// The tag in its canonical spelling.
        tag: &'a str,
        /// The variant record.
        record: &'a RecordDescriptor,
    },
    /// The tag is not known to this build of the schema.
    Unrecognized,
}

impl VariantResolution<'_> {
    /// Returns `true` for [`VariantResolution::Unrecognized`].
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized)
    }
}

/// Frozen table of record, enum and operation descriptors.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    records: BTreeMap<String, RecordDescriptor>,
    enums: EnumRegistry,
    operations: BTreeMap<String, Operation>,
}

impl SchemaRegistry {
    /// Creates an empty builder.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Looks up a record descriptor by name.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::SchemaMissing`] if the record was never registered.
    pub fn lookup(&self, name: &str) -> Result<&RecordDescriptor, SchemaError> {
        self.records.get(name).ok_or_else(|| SchemaError::missing(name))
    }

    /// Returns the enum registry.
    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    /// Looks up an operation by id.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::OperationMissing`] for unknown ids.
    pub fn operation(&self, id: &str) -> Result<&Operation, SchemaError> {
        self.operations
            .get(id)
            .ok_or_else(|| SchemaError::OperationMissing { id: id.to_string() })
    }

    /// Iterates over operations in id order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    /// Iterates over records in name order.
    pub fn records(&self) -> impl Iterator<Item = &RecordDescriptor> {
        self.records.values()
    }

    /// Dispatches a discriminator value through `base`'s variant table.
    ///
    /// An exact match wins. Otherwise the tag is canonicalized through the
    /// discriminator enum when the base declares one, or compared
    /// case-insensitively against the table when it does not.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::NotPolymorphic`] if `base` has no variant table,
    /// or [`SchemaError::SchemaMissing`] if the table points at an
    /// unregistered record.
    pub fn resolve_variant<'a>(
        &'a self,
        base: &'a RecordDescriptor,
        tag: &str,
    ) -> Result<VariantResolution<'a>, SchemaError> {
        let Some(table) = &base.polymorphism else {
            return Err(SchemaError::NotPolymorphic {
                name: base.name.clone(),
            });
        };

        let canonical = match &table.discriminator_enum {
            Some(enum_name) => self.enums.canonical(enum_name, tag)?.map(str::to_string),
            None => table
                .tags()
                .find(|known| known.eq_ignore_ascii_case(tag))
                .map(str::to_string),
        };
        let Some(canonical) = canonical else {
            return Ok(VariantResolution::Unrecognized);
        };

        let entry = table.variants.iter().find(|(t, _)| *t == canonical);
        match entry {
            Some((tag, record)) => Ok(VariantResolution::Known {
                tag: tag.as_str(),
                record: self.lookup(record)?,
            }),
            None => Ok(VariantResolution::Unrecognized),
        }
    }
}

/// Collects descriptors and validates them as a whole.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    records: BTreeMap<String, RecordDescriptor>,
    enums: EnumRegistry,
    operations: BTreeMap<String, Operation>,
    problems: Vec<String>,
}

impl SchemaRegistryBuilder {
    /// Registers a record descriptor.
    pub fn record(&mut self, record: RecordDescriptor) -> &mut Self {
        let name = record.name.clone();
        if self.records.insert(name.clone(), record).is_some() {
            self.problems.push(format!("record '{name}' registered twice"));
        }
        self
    }

    /// Registers several record descriptors.
    pub fn records(&mut self, records: impl IntoIterator<Item = RecordDescriptor>) -> &mut Self {
        for record in records {
            self.record(record);
        }
        self
    }

    /// Registers an enum descriptor.
    pub fn enumeration(&mut self, descriptor: EnumDescriptor) -> &mut Self {
        let name = descriptor.name().to_string();
        if self.enums.insert(descriptor).is_some() {
            self.problems.push(format!("enum '{name}' registered twice"));
        }
        self
    }

    /// Registers an operation.
    pub fn operation(&mut self, operation: Operation) -> &mut Self {
        let id = operation.id.clone();
        if self.operations.insert(id.clone(), operation).is_some() {
            self.problems.push(format!("operation '{id}' registered twice"));
        }
        self
    }

    /// Validates every descriptor and freezes the registry.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::Invalid`] listing every problem found.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let registry = SchemaRegistry {
            records: self.records,
            enums: self.enums,
            operations: self.operations,
        };

        let mut problems = self.problems;
        problems.extend(validation::check_registry(&registry));
        if !problems.is_empty() {
            return Err(SchemaError::Invalid { problems });
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, ValueKind};
    use crate::record::Polymorphism;

    fn criteria_builder() -> SchemaRegistryBuilder {
        let mut builder = SchemaRegistry::builder();
        builder
            .record(
                RecordDescriptor::new("MatchCriteria").polymorphic(
                    Polymorphism::new("matchType")
                        .variant("MATCH_ALL", "MatchAll")
                        .variant("DRG_ATTACHMENT_ID", "ByAttachmentId"),
                ),
            )
            .record(RecordDescriptor::new("MatchAll").variant_of("MatchCriteria", "matchType", "MATCH_ALL"))
            .record(
                RecordDescriptor::new("ByAttachmentId")
                    .variant_of("MatchCriteria", "matchType", "DRG_ATTACHMENT_ID")
                    .field(FieldDescriptor::body("drgAttachmentId", ValueKind::string()).required()),
            );
        builder
    }

    #[test]
    fn test_lookup_missing() {
        let registry = criteria_builder().build().unwrap();
        assert!(matches!(
            registry.lookup("Nope"),
            Err(SchemaError::SchemaMissing { .. })
        ));
    }

    #[test]
    fn test_resolve_without_enum_is_case_insensitive() {
        let registry = criteria_builder().build().unwrap();
        let base = registry.lookup("MatchCriteria").unwrap();
        let resolved = registry.resolve_variant(base, "match_all").unwrap();
        assert!(matches!(
            resolved,
            VariantResolution::Known { tag: "MATCH_ALL", .. }
        ));
    }

    #[test]
    fn test_resolve_unknown_tag() {
        let registry = criteria_builder().build().unwrap();
        let base = registry.lookup("MatchCriteria").unwrap();
        assert!(registry.resolve_variant(base, "FUTURE").unwrap().is_unrecognized());
    }

    #[test]
    fn test_resolve_on_plain_record_fails() {
        let registry = criteria_builder().build().unwrap();
        let plain = registry.lookup("MatchAll").unwrap();
        assert!(matches!(
            registry.resolve_variant(plain, "MATCH_ALL"),
            Err(SchemaError::NotPolymorphic { .. })
        ));
    }

    #[test]
    fn test_duplicate_registration_is_reported() {
        let mut builder = criteria_builder();
        builder.record(RecordDescriptor::new("MatchAll"));
        let err = builder.build().unwrap_err();
        let SchemaError::Invalid { problems } = err else {
            panic!("expected Invalid");
        };
        assert!(problems.iter().any(|p| p.contains("registered twice")));
    }
}

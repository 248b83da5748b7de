//! Record descriptors and polymorphism metadata.
//!
//! A polymorphic family is modelled as a base [`RecordDescriptor`] carrying a
//! [`Polymorphism`] table plus one variant record per discriminator value.
//! Each variant records its own tag in [`VariantOf`], so encoding a variant
//! never has to consult the base.
//!
//! ## Examples
//!
//! ```
//! use coreapi_define::{FieldDescriptor, Polymorphism, RecordDescriptor, ValueKind};
//!
//! let base = RecordDescriptor::new("PlatformConfig")
//!     .field(FieldDescriptor::body("isSecureBootEnabled", ValueKind::boolean()))
//!     .polymorphic(
//!         Polymorphism::new("type")
//!             .discriminator_enum("PlatformConfigType")
//!             .variant("AMD_VM", "AmdVmPlatformConfig"),
//!     );
//! assert!(base.is_polymorphic_base());
//!
//! let variant = RecordDescriptor::new("AmdVmPlatformConfig")
//!     .variant_of("PlatformConfig", "type", "AMD_VM");
//! assert_eq!(variant.tag(), Some("AMD_VM"));
//! ```

use crate::field::{FieldDescriptor, Location};

/// Discriminator and variant table carried by a polymorphic base record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polymorphism {
    /// Wire name of the discriminator field (`type`, `matchType`, ...).
    pub discriminator: String,
    /// Enum the discriminator values belong to, when the schema declares one.
    pub discriminator_enum: Option<String>,
    /// Tag emitted when a value of the base record itself is encoded.
    pub default_tag: Option<String>,
    /// Discriminator value to variant record name, in declaration order.
    pub variants: Vec<(String, String)>,
}

impl Polymorphism {
    /// Creates an empty table keyed by the given discriminator wire name.
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            discriminator_enum: None,
            default_tag: None,
            variants: Vec::new(),
        }
    }

    /// Declares the enum the discriminator values belong to.
    pub fn discriminator_enum(mut self, name: impl Into<String>) -> Self {
        self.discriminator_enum = Some(name.into());
        self
    }

    /// Sets the tag emitted when encoding the base record itself.
    pub fn default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = Some(tag.into());
        self
    }

    /// Adds a variant.
    pub fn variant(mut self, tag: impl Into<String>, record: impl Into<String>) -> Self {
        self.variants.push((tag.into(), record.into()));
        self
    }

    /// Returns the record name registered for an exact tag.
    pub fn variant_for(&self, tag: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, record)| record.as_str())
    }

    /// Iterates over the declared tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(tag, _)| tag.as_str())
    }
}

/// Marks a record as one variant of a polymorphic base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOf {
    /// Name of the base record.
    pub base: String,
    /// Wire name of the discriminator field.
    pub discriminator: String,
    /// The discriminator value this variant is emitted with.
    pub tag: String,
}

/// Describes a record type: its ordered fields and, optionally, its place in a
/// polymorphic family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// Record type name.
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// Fields in wire order.
    pub fields: Vec<FieldDescriptor>,
    /// Set on polymorphic bases.
    pub polymorphism: Option<Polymorphism>,
    /// Set on polymorphic variants.
    pub variant_of: Option<VariantOf>,
}

impl RecordDescriptor {
    /// Creates an empty record descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            polymorphism: None,
            variant_of: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends several fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Makes this record a polymorphic base.
    pub fn polymorphic(mut self, polymorphism: Polymorphism) -> Self {
        self.polymorphism = Some(polymorphism);
        self
    }

    /// Makes this record a variant of `base`, emitted with `tag`.
    pub fn variant_of(
        mut self,
        base: impl Into<String>,
        discriminator: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        self.variant_of = Some(VariantOf {
            base: base.into(),
            discriminator: discriminator.into(),
            tag: tag.into(),
        });
        self
    }

    /// Returns `true` if this record carries a variant table.
    pub fn is_polymorphic_base(&self) -> bool {
        self.polymorphism.is_some()
    }

    /// Returns the discriminator wire name, for bases and variants alike.
    pub fn discriminator(&self) -> Option<&str> {
        self.polymorphism
            .as_ref()
            .map(|p| p.discriminator.as_str())
            .or_else(|| self.variant_of.as_ref().map(|v| v.discriminator.as_str()))
    }

    /// Returns the tag emitted when encoding this record.
    ///
    /// Variants emit their own tag; bases emit their declared default tag.
    pub fn tag(&self) -> Option<&str> {
        self.variant_of
            .as_ref()
            .map(|v| v.tag.as_str())
            .or_else(|| {
                self.polymorphism
                    .as_ref()
                    .and_then(|p| p.default_tag.as_deref())
            })
    }

    /// Looks up a field by logical name.
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field by wire name.
    pub fn field_by_wire_name(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }

    /// Iterates over fields at one location, in declaration order.
    pub fn fields_at(&self, location: Location) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.location == location)
    }
}

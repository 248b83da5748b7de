//! Enum descriptors and the enum registry.
//!
//! Enum values are accepted in any case and always emitted in their
//! canonical spelling (upper-snake for the Core Services API). The canonical
//! values keep the order the API documents them in, which is also the order
//! they are listed in diagnostics.
//!
//! ## Examples
//!
//! ```
//! use coreapi_define::EnumDescriptor;
//!
//! let ike = EnumDescriptor::new("IkeVersion", ["V1", "V2"]);
//! assert_eq!(ike.canonical("v2"), Some("V2"));
//! assert_eq!(ike.canonical("V3"), None);
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::error::SchemaError;

/// Describes one enumerated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    values: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl EnumDescriptor {
    /// Creates a descriptor from canonical values in documented order.
    ///
    /// Values colliding under case-insensitive comparison are kept in
    /// `values` so that [`SchemaRegistryBuilder::build`](crate::SchemaRegistryBuilder::build)
    /// can report them; lookup resolves to the first spelling.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let mut lookup = HashMap::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            lookup.entry(value.to_lowercase()).or_insert(index);
        }
        Self {
            name: name.into(),
            values,
            lookup,
        }
    }

    /// Enum type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical values in documented order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the canonical spelling of `raw`, or `None` if it is not a
    /// member of this enum.
    ///
    /// The empty string is never a member; callers treat it as "unset".
    pub fn canonical(&self, raw: &str) -> Option<&str> {
        if raw.is_empty() {
            return None;
        }
        self.lookup
            .get(&raw.to_lowercase())
            .map(|&index| self.values[index].as_str())
    }

    /// Returns `true` if `raw` is a member under case-insensitive comparison.
    pub fn contains(&self, raw: &str) -> bool {
        self.canonical(raw).is_some()
    }

    /// Returns values that collide with an earlier value case-insensitively.
    pub(crate) fn collisions(&self) -> Vec<&str> {
        self.values
            .iter()
            .enumerate()
            .filter(|(index, value)| self.lookup.get(&value.to_lowercase()) != Some(index))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Read-only collection of enum descriptors keyed by name.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: BTreeMap<String, EnumDescriptor>,
}

impl EnumRegistry {
    pub(crate) fn insert(&mut self, descriptor: EnumDescriptor) -> Option<EnumDescriptor> {
        self.enums.insert(descriptor.name.clone(), descriptor)
    }

    /// Looks up an enum descriptor.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::EnumMissing`] if the enum was never registered.
    pub fn get(&self, name: &str) -> Result<&EnumDescriptor, SchemaError> {
        self.enums
            .get(name)
            .ok_or_else(|| SchemaError::EnumMissing {
                name: name.to_string(),
            })
    }

    /// Returns `true` if the enum is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// Canonicalizes `raw` against the named enum.
    ///
    /// `Ok(None)` means the enum exists but `raw` is not one of its values.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::EnumMissing`] if the enum was never registered.
    pub fn canonical(&self, name: &str, raw: &str) -> Result<Option<&str>, SchemaError> {
        Ok(self.get(name)?.canonical(raw))
    }

    /// Canonical values of the named enum in documented order.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::EnumMissing`] if the enum was never registered.
    pub fn values(&self, name: &str) -> Result<&[String], SchemaError> {
        Ok(self.get(name)?.values())
    }

    /// Iterates over all registered enums in name order.
    pub fn iter(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.enums.values()
    }

    /// Number of registered enums.
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    /// Returns `true` if no enums are registered.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifecycle() -> EnumDescriptor {
        EnumDescriptor::new(
            "InstanceLifecycleState",
            ["MOVING", "PROVISIONING", "RUNNING", "STOPPED"],
        )
    }

    #[test]
    fn test_canonical_any_case() {
        let e = lifecycle();
        assert_eq!(e.canonical("running"), Some("RUNNING"));
        assert_eq!(e.canonical("Running"), Some("RUNNING"));
        assert_eq!(e.canonical("RUNNING"), Some("RUNNING"));
    }

    #[test]
    fn test_empty_is_not_a_member() {
        assert_eq!(lifecycle().canonical(""), None);
    }

    #[test]
    fn test_values_keep_documented_order() {
        assert_eq!(
            lifecycle().values(),
            &["MOVING", "PROVISIONING", "RUNNING", "STOPPED"]
        );
    }

    #[test]
    fn test_collisions() {
        let e = EnumDescriptor::new("Broken", ["ACTIVE", "active", "DONE"]);
        assert_eq!(e.collisions(), vec!["active"]);
        assert_eq!(e.canonical("Active"), Some("ACTIVE"));
        assert!(lifecycle().collisions().is_empty());
    }

    #[test]
    fn test_registry_missing_enum() {
        let registry = EnumRegistry::default();
        let err = registry.canonical("Nope", "x").unwrap_err();
        assert!(matches!(err, SchemaError::EnumMissing { .. }));
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = EnumRegistry::default();
        registry.insert(lifecycle());
        assert_eq!(
            registry.canonical("InstanceLifecycleState", "stopped").unwrap(),
            Some("STOPPED")
        );
        assert_eq!(registry.canonical("InstanceLifecycleState", "gone").unwrap(), None);
        assert_eq!(registry.values("InstanceLifecycleState").unwrap().len(), 4);
    }
}

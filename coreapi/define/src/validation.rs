//! Whole-registry consistency checks run by
//! [`SchemaRegistryBuilder::build`](crate::SchemaRegistryBuilder::build).
//!
//! ## Checks
//!
//! - **Enums**: no two canonical values collide case-insensitively
//! - **Records**: wire names and logical names are unique per record, every
//!   referenced record / enum / polymorphic base exists, path fields are
//!   mandatory scalars, header and query fields carry string-coercible kinds
//! - **Polymorphism**: the variant table is total over the discriminator
//!   enum, every variant points back at its base with the same tag, the
//!   default tag is in the table
//! - **Operations**: request and response records exist, the path template
//!   is well formed and its placeholders match the request's path fields

use std::collections::BTreeSet;

use crate::field::{Location, ValueKind};
use crate::record::RecordDescriptor;
use crate::registry::SchemaRegistry;

/// Returns every problem found in `registry`, in discovery order.
pub(crate) fn check_registry(registry: &SchemaRegistry) -> Vec<String> {
    let mut problems = Vec::new();

    for descriptor in registry.enums().iter() {
        for value in descriptor.collisions() {
            problems.push(format!(
                "enum '{}': value '{value}' collides with another value ignoring case",
                descriptor.name()
            ));
        }
        if descriptor.values().is_empty() {
            problems.push(format!("enum '{}' has no values", descriptor.name()));
        }
    }

    for record in registry.records() {
        check_record(registry, record, &mut problems);
    }

    for operation in registry.operations() {
        let id = &operation.id;
        if !operation.has_well_formed_path() {
            problems.push(format!("operation '{id}': malformed path template '{}'", operation.path));
        }
        if registry.lookup(&operation.response).is_err() {
            problems.push(format!(
                "operation '{id}': unknown response record '{}'",
                operation.response
            ));
        }
        let Ok(request) = registry.lookup(&operation.request) else {
            problems.push(format!(
                "operation '{id}': unknown request record '{}'",
                operation.request
            ));
            continue;
        };
        let placeholders: BTreeSet<&str> = operation.path_params().into_iter().collect();
        let path_fields: BTreeSet<&str> = request
            .fields_at(Location::Path)
            .map(|f| f.wire_name.as_str())
            .collect();
        for missing in placeholders.difference(&path_fields) {
            problems.push(format!(
                "operation '{id}': placeholder '{{{missing}}}' has no path field in '{}'",
                request.name
            ));
        }
        for unused in path_fields.difference(&placeholders) {
            problems.push(format!(
                "operation '{id}': path field '{unused}' has no placeholder in '{}'",
                operation.path
            ));
        }
    }

    problems
}

fn check_record(registry: &SchemaRegistry, record: &RecordDescriptor, problems: &mut Vec<String>) {
    let name = &record.name;
    let mut wire_names = BTreeSet::new();
    let mut logical_names = BTreeSet::new();

    for field in &record.fields {
        if !wire_names.insert(field.wire_name.as_str()) {
            problems.push(format!("record '{name}': wire name '{}' used twice", field.wire_name));
        }
        if !logical_names.insert(field.name.as_str()) {
            problems.push(format!("record '{name}': field name '{}' used twice", field.name));
        }
        check_kind(registry, name, &field.wire_name, &field.kind, problems);

        match field.location {
            Location::Path => {
                if !field.required {
                    problems.push(format!(
                        "record '{name}': path field '{}' must be mandatory",
                        field.wire_name
                    ));
                }
                if !is_string_coercible(&field.kind) {
                    problems.push(format!(
                        "record '{name}': path field '{}' must be a scalar or enum",
                        field.wire_name
                    ));
                }
            }
            Location::Header if !is_string_coercible(&field.kind) => {
                problems.push(format!(
                    "record '{name}': header field '{}' must be a scalar or enum",
                    field.wire_name
                ));
            }
            Location::Query => {
                let item = match &field.kind {
                    ValueKind::SequenceOf(item) => item.as_ref(),
                    other => other,
                };
                if !is_string_coercible(item) {
                    problems.push(format!(
                        "record '{name}': query field '{}' must be a scalar, enum or sequence of those",
                        field.wire_name
                    ));
                }
            }
            _ => {}
        }
    }

    if let Some(table) = &record.polymorphism {
        let tags: BTreeSet<&str> = table.tags().collect();
        if tags.len() != table.variants.len() {
            problems.push(format!("record '{name}': variant table lists a tag twice"));
        }
        if let Some(enum_name) = &table.discriminator_enum {
            match registry.enums().get(enum_name) {
                Ok(descriptor) => {
                    let declared: BTreeSet<&str> =
                        descriptor.values().iter().map(String::as_str).collect();
                    for missing in declared.difference(&tags) {
                        problems.push(format!(
                            "record '{name}': discriminator value '{missing}' has no variant"
                        ));
                    }
                    for extra in tags.difference(&declared) {
                        problems.push(format!(
                            "record '{name}': variant tag '{extra}' is not a value of enum '{enum_name}'"
                        ));
                    }
                }
                Err(_) => problems.push(format!(
                    "record '{name}': unknown discriminator enum '{enum_name}'"
                )),
            }
        }
        if let Some(default_tag) = &table.default_tag {
            if !tags.contains(default_tag.as_str()) {
                problems.push(format!(
                    "record '{name}': default tag '{default_tag}' is not in the variant table"
                ));
            }
        }
        for (tag, variant_name) in &table.variants {
            let Ok(variant) = registry.lookup(variant_name) else {
                problems.push(format!(
                    "record '{name}': variant '{tag}' points at unknown record '{variant_name}'"
                ));
                continue;
            };
            let back_reference = variant.variant_of.as_ref().is_some_and(|v| {
                v.base == *name && v.tag == *tag && v.discriminator == table.discriminator
            });
            if !back_reference {
                problems.push(format!(
                    "record '{variant_name}': must be declared as variant '{tag}' of '{name}' keyed by '{}'",
                    table.discriminator
                ));
            }
        }
    }

    if let Some(variant_of) = &record.variant_of {
        let listed = registry
            .lookup(&variant_of.base)
            .ok()
            .and_then(|base| base.polymorphism.as_ref())
            .and_then(|table| table.variant_for(&variant_of.tag))
            .is_some_and(|listed| listed == name);
        if !listed {
            problems.push(format!(
                "record '{name}': base '{}' does not list it under tag '{}'",
                variant_of.base, variant_of.tag
            ));
        }
        if record.field_by_wire_name(&variant_of.discriminator).is_some() {
            problems.push(format!(
                "record '{name}': discriminator '{}' must not also be declared as a field",
                variant_of.discriminator
            ));
        }
    }
}

fn check_kind(
    registry: &SchemaRegistry,
    record: &str,
    field: &str,
    kind: &ValueKind,
    problems: &mut Vec<String>,
) {
    match kind {
        ValueKind::Scalar(_) | ValueKind::Opaque => {}
        ValueKind::Enum(enum_name) => {
            if !registry.enums().contains(enum_name) {
                problems.push(format!(
                    "record '{record}': field '{field}' references unknown enum '{enum_name}'"
                ));
            }
        }
        ValueKind::Record(target) => {
            if registry.lookup(target).is_err() {
                problems.push(format!(
                    "record '{record}': field '{field}' references unknown record '{target}'"
                ));
            }
        }
        ValueKind::Polymorphic(base) => match registry.lookup(base) {
            Ok(descriptor) if descriptor.is_polymorphic_base() => {}
            Ok(_) => problems.push(format!(
                "record '{record}': field '{field}' references '{base}', which is not a polymorphic base"
            )),
            Err(_) => problems.push(format!(
                "record '{record}': field '{field}' references unknown record '{base}'"
            )),
        },
        ValueKind::SequenceOf(item) | ValueKind::MappingOf(item) => {
            check_kind(registry, record, field, item, problems);
        }
    }
}

fn is_string_coercible(kind: &ValueKind) -> bool {
    matches!(kind, ValueKind::Scalar(_) | ValueKind::Enum(_))
}

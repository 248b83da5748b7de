//! Core Services API Definitions
//!
//! This crate contains the generated Core Services schema tables built from
//! the primitives in `coreapi-define`. Each service area lives in its own
//! module and exposes a `register` function; [`core_services`] assembles all
//! of them into one validated, process-wide [`SchemaRegistry`].
//!
//! ## Service Areas
//!
//! - [`common`] - Shared headers, pagination, tags and the error record
//! - [`compute`] - Instances, platform configurations, maintenance events, pools
//! - [`networking`] - DRG route distributions, IPSec tunnels, FastConnect circuits
//! - [`storage`] - Block volumes
//!
//! ## Examples
//!
//! ```
//! use coreapi_definitions::{compute::instance, core_services};
//!
//! let registry = core_services().unwrap();
//! let op = registry.operation(instance::GET_INSTANCE).unwrap();
//! assert_eq!(op.path, "/instances/{instanceId}");
//! ```

pub mod common;
pub mod compute;
pub mod networking;
pub mod prelude;
pub mod storage;

use coreapi_define::{SchemaError, SchemaRegistry, SchemaRegistryBuilder};
use once_cell::sync::OnceCell;

static CORE_SERVICES: OnceCell<SchemaRegistry> = OnceCell::new();

/// Registers every Core Services schema on `builder`.
pub fn register_all(builder: &mut SchemaRegistryBuilder) {
    common::register(builder);
    compute::register(builder);
    networking::register(builder);
    storage::register(builder);
}

/// Returns the process-wide Core Services registry, building it on first use.
///
/// ## Errors
///
/// Returns [`SchemaError::Invalid`] if the tables are inconsistent. A failed
/// build is not cached, so every call reports the same problems.
pub fn core_services() -> Result<&'static SchemaRegistry, SchemaError> {
    CORE_SERVICES.get_or_try_init(|| {
        let mut builder = SchemaRegistry::builder();
        register_all(&mut builder);
        builder.build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coreapi_define::{Location, RestMethod, VariantResolution};

    #[test]
    fn registry_builds() {
        let registry = core_services().unwrap();
        assert!(registry.operations().count() >= 20);
        assert!(!registry.enums().is_empty());
    }

    #[test]
    fn registry_is_shared() {
        let a = core_services().unwrap();
        let b = core_services().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn every_operation_resolves_its_records() {
        let registry = core_services().unwrap();
        for op in registry.operations() {
            assert!(registry.lookup(&op.request).is_ok(), "{}", op.id);
            assert!(registry.lookup(&op.response).is_ok(), "{}", op.id);
        }
    }

    #[test]
    fn maintenance_event_query_order() {
        let registry = core_services().unwrap();
        let op = registry
            .operation(compute::maintenance::LIST_INSTANCE_MAINTENANCE_EVENTS)
            .unwrap();
        assert_eq!(op.method, RestMethod::Get);
        let request = registry.lookup(&op.request).unwrap();
        let query: Vec<&str> = request
            .fields_at(Location::Query)
            .map(|f| f.wire_name.as_str())
            .collect();
        assert_eq!(query.first(), Some(&"compartmentId"));
        assert!(query.contains(&"instanceAction"));
        assert!(query.contains(&"page"));
    }

    #[test]
    fn match_criteria_dispatch() {
        let registry = core_services().unwrap();
        let base = registry.lookup(networking::drg::MATCH_CRITERIA).unwrap();
        match registry.resolve_variant(base, "drg_attachment_id").unwrap() {
            VariantResolution::Known { tag, record } => {
                assert_eq!(tag, "DRG_ATTACHMENT_ID");
                assert!(record.field_named("drgAttachmentId").unwrap().required);
            }
            VariantResolution::Unrecognized => panic!("expected a known variant"),
        }
    }

    #[test]
    fn statement_action_is_mandatory() {
        let registry = core_services().unwrap();
        let statement = registry.lookup(networking::drg::STATEMENT).unwrap();
        assert!(statement.field_named("action").unwrap().required);
        assert!(!statement.field_named("matchCriteria").unwrap().required);
    }

    #[test]
    fn ipsec_enums_are_upper_snake() {
        let registry = core_services().unwrap();
        let enums = registry.enums();
        assert_eq!(
            enums
                .canonical(networking::ipsec::ORACLE_INITIATION, "responder_only")
                .unwrap(),
            Some("RESPONDER_ONLY")
        );
        assert_eq!(
            enums
                .canonical(networking::ipsec::PHASE_TWO_ENCRYPTION, "aes_256_gcm")
                .unwrap(),
            Some("AES_256_GCM")
        );
    }
}

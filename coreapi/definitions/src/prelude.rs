//! Convenient re-exports for working with the Core Services definitions.
//!
//! ## Examples
//!
//! ```
//! use coreapi_definitions::prelude::*;
//!
//! let registry = core_services().unwrap();
//! assert!(registry.operation(GET_VOLUME).is_ok());
//! ```

// Registry entry points
pub use crate::{core_services, register_all};

// Operation ids
pub use crate::compute::instance::{
    GET_INSTANCE, INSTANCE_ACTION, LAUNCH_INSTANCE, LIST_INSTANCES, TERMINATE_INSTANCE,
};
pub use crate::compute::maintenance::{
    GET_INSTANCE_MAINTENANCE_EVENT, LIST_INSTANCE_MAINTENANCE_EVENTS,
};
pub use crate::compute::pools::{
    DETACH_INSTANCE_POOL_INSTANCE, GET_CLUSTER_NETWORK, GET_COMPUTE_CAPACITY_RESERVATION,
    GET_INSTANCE_POOL, LIST_CLUSTER_NETWORK_INSTANCES, LIST_INSTANCE_POOL_INSTANCES,
    UPDATE_INSTANCE_POOL,
};
pub use crate::networking::drg::{ADD_STATEMENTS, LIST_STATEMENTS};
pub use crate::networking::fastconnect::{GET_VIRTUAL_CIRCUIT, LIST_VIRTUAL_CIRCUITS};
pub use crate::networking::ipsec::{
    CREATE_IPSEC_CONNECTION, GET_IPSEC_CONNECTION_TUNNEL, LIST_IPSEC_CONNECTION_TUNNELS,
};
pub use crate::storage::volume::{GET_VOLUME, LIST_VOLUMES};

// Polymorphic bases
pub use crate::compute::platform::{LAUNCH_PLATFORM_CONFIG, PLATFORM_CONFIG};
pub use crate::networking::drg::MATCH_CRITERIA;

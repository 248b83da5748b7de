//! Instance pools, cluster networks and capacity reservations.
//!
//! These are the groupings a node-group autoscaler resizes and inspects.

use coreapi_define::prelude::*;

use crate::common;

/// `GET /instancePools/{instancePoolId}`
pub const GET_INSTANCE_POOL: &str = "GetInstancePool";
/// `PUT /instancePools/{instancePoolId}`
pub const UPDATE_INSTANCE_POOL: &str = "UpdateInstancePool";
/// `GET /instancePools/{instancePoolId}/instances`
pub const LIST_INSTANCE_POOL_INSTANCES: &str = "ListInstancePoolInstances";
/// `POST /instancePools/{instancePoolId}/actions/detachInstance`
pub const DETACH_INSTANCE_POOL_INSTANCE: &str = "DetachInstancePoolInstance";
/// `GET /clusterNetworks/{clusterNetworkId}`
pub const GET_CLUSTER_NETWORK: &str = "GetClusterNetwork";
/// `GET /clusterNetworks/{clusterNetworkId}/instances`
pub const LIST_CLUSTER_NETWORK_INSTANCES: &str = "ListClusterNetworkInstances";
/// `GET /computeCapacityReservations/{capacityReservationId}`
pub const GET_COMPUTE_CAPACITY_RESERVATION: &str = "GetComputeCapacityReservation";

const POOL_STATES: [&str; 8] = [
    "PROVISIONING",
    "SCALING",
    "STARTING",
    "STOPPING",
    "TERMINATING",
    "STOPPED",
    "TERMINATED",
    "RUNNING",
];

fn instance_list_request(name: &str, path_field: &str) -> RecordDescriptor {
    RecordDescriptor::new(name)
        .field(common::compartment_query())
        .field(FieldDescriptor::path(path_field, ValueKind::string()))
        .field(FieldDescriptor::query("displayName", ValueKind::string()))
        .fields(common::pagination())
        .fields(common::sorting())
        .field(common::opc_request_id())
}

/// Registers pool, cluster network and capacity reservation schemas.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder
        .enumeration(EnumDescriptor::new("InstancePoolLifecycleState", POOL_STATES))
        .enumeration(EnumDescriptor::new("ClusterNetworkLifecycleState", POOL_STATES))
        .enumeration(EnumDescriptor::new(
            "ComputeCapacityReservationLifecycleState",
            ["ACTIVE", "CREATING", "UPDATING", "MOVING", "DELETED", "DELETING"],
        ));

    builder.records([
        RecordDescriptor::new("InstancePoolPlacementConfiguration").fields([
            FieldDescriptor::body("availabilityDomain", ValueKind::string()).required(),
            FieldDescriptor::body("faultDomains", ValueKind::sequence_of(ValueKind::string())),
            FieldDescriptor::body("primarySubnetId", ValueKind::string()),
        ]),
        RecordDescriptor::new("InstancePool")
            .with_description("A group of instances created from one instance configuration")
            .fields([
                FieldDescriptor::body("id", ValueKind::string()).required(),
                FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
                common::defined_tags(),
                FieldDescriptor::body("displayName", ValueKind::string()),
                common::freeform_tags(),
                FieldDescriptor::body("instanceConfigurationId", ValueKind::string()).required(),
                FieldDescriptor::body(
                    "lifecycleState",
                    ValueKind::enumeration("InstancePoolLifecycleState"),
                )
                .required(),
                FieldDescriptor::body(
                    "placementConfigurations",
                    ValueKind::sequence_of(ValueKind::record("InstancePoolPlacementConfiguration")),
                )
                .required(),
                FieldDescriptor::body("size", ValueKind::int32()).required(),
                FieldDescriptor::body("timeCreated", ValueKind::timestamp()).required(),
                FieldDescriptor::body("instanceDisplayNameFormatter", ValueKind::string()),
                FieldDescriptor::body("instanceHostnameFormatter", ValueKind::string()),
            ]),
        RecordDescriptor::new("UpdateInstancePoolDetails").fields([
            common::defined_tags(),
            FieldDescriptor::body("displayName", ValueKind::string()),
            common::freeform_tags(),
            FieldDescriptor::body("instanceConfigurationId", ValueKind::string()),
            FieldDescriptor::body(
                "placementConfigurations",
                ValueKind::sequence_of(ValueKind::record("InstancePoolPlacementConfiguration")),
            ),
            FieldDescriptor::body("size", ValueKind::int32()),
        ]),
        RecordDescriptor::new("InstanceSummary").fields([
            FieldDescriptor::body("id", ValueKind::string()).required(),
            FieldDescriptor::body("availabilityDomain", ValueKind::string()).required(),
            FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
            FieldDescriptor::body("displayName", ValueKind::string()),
            FieldDescriptor::body("faultDomain", ValueKind::string()),
            FieldDescriptor::body("instanceConfigurationId", ValueKind::string()).required(),
            FieldDescriptor::body("region", ValueKind::string()).required(),
            FieldDescriptor::body("shape", ValueKind::string()),
            FieldDescriptor::body("state", ValueKind::string()).required(),
            FieldDescriptor::body("timeCreated", ValueKind::timestamp()).required(),
        ]),
        RecordDescriptor::new("DetachInstancePoolInstanceDetails").fields([
            FieldDescriptor::body("instanceId", ValueKind::string()).required(),
            FieldDescriptor::body("isDecrementSize", ValueKind::boolean()),
            FieldDescriptor::body("isAutoTerminate", ValueKind::boolean()),
        ]),
        RecordDescriptor::new("ClusterNetwork").fields([
            FieldDescriptor::body("id", ValueKind::string()).required(),
            FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
            common::defined_tags(),
            FieldDescriptor::body("displayName", ValueKind::string()),
            common::freeform_tags(),
            FieldDescriptor::body("hpcIslandId", ValueKind::string()),
            FieldDescriptor::body("networkBlockIds", ValueKind::sequence_of(ValueKind::string())),
            FieldDescriptor::body(
                "instancePools",
                ValueKind::sequence_of(ValueKind::record("InstancePool")),
            ),
            FieldDescriptor::body(
                "lifecycleState",
                ValueKind::enumeration("ClusterNetworkLifecycleState"),
            )
            .required(),
            FieldDescriptor::body("timeCreated", ValueKind::timestamp()).required(),
            FieldDescriptor::body("timeUpdated", ValueKind::timestamp()).required(),
        ]),
        RecordDescriptor::new("InstanceReservationShapeConfigDetails").fields([
            FieldDescriptor::body("ocpus", ValueKind::float32()),
            FieldDescriptor::body("memoryInGBs", ValueKind::float32()),
        ]),
        RecordDescriptor::new("InstanceReservationConfig").fields([
            FieldDescriptor::body("faultDomain", ValueKind::string()),
            FieldDescriptor::body("instanceShape", ValueKind::string()).required(),
            FieldDescriptor::body(
                "instanceShapeConfig",
                ValueKind::record("InstanceReservationShapeConfigDetails"),
            ),
            FieldDescriptor::body("reservedCount", ValueKind::int64()).required(),
            FieldDescriptor::body("usedCount", ValueKind::int64()).required(),
        ]),
        RecordDescriptor::new("ComputeCapacityReservation").fields([
            FieldDescriptor::body("id", ValueKind::string()).required(),
            FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
            FieldDescriptor::body("availabilityDomain", ValueKind::string()).required(),
            common::defined_tags(),
            FieldDescriptor::body("displayName", ValueKind::string()),
            common::freeform_tags(),
            FieldDescriptor::body(
                "instanceReservationConfigs",
                ValueKind::sequence_of(ValueKind::record("InstanceReservationConfig")),
            ),
            FieldDescriptor::body("isDefaultReservation", ValueKind::boolean()),
            FieldDescriptor::body(
                "lifecycleState",
                ValueKind::enumeration("ComputeCapacityReservationLifecycleState"),
            )
            .required(),
            FieldDescriptor::body("reservedInstanceCount", ValueKind::int64()),
            FieldDescriptor::body("usedInstanceCount", ValueKind::int64()),
            FieldDescriptor::body("timeCreated", ValueKind::timestamp()).required(),
            FieldDescriptor::body("timeUpdated", ValueKind::timestamp()),
        ]),
    ]);

    builder
        .record(
            RecordDescriptor::new("GetInstancePoolRequest")
                .field(FieldDescriptor::path("instancePoolId", ValueKind::string()))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response("GetInstancePoolResponse", "instancePool", "InstancePool"))
        .operation(Operation::new(
            GET_INSTANCE_POOL,
            RestMethod::Get,
            "/instancePools/{instancePoolId}",
            "GetInstancePoolRequest",
            "GetInstancePoolResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("UpdateInstancePoolRequest")
                .field(FieldDescriptor::path("instancePoolId", ValueKind::string()))
                .field(
                    FieldDescriptor::body(
                        "updateInstancePoolDetails",
                        ValueKind::record("UpdateInstancePoolDetails"),
                    )
                    .required(),
                )
                .field(common::opc_retry_token())
                .field(common::if_match())
                .field(common::opc_request_id()),
        )
        .record(common::entity_response(
            "UpdateInstancePoolResponse",
            "instancePool",
            "InstancePool",
        ))
        .operation(
            Operation::new(
                UPDATE_INSTANCE_POOL,
                RestMethod::Put,
                "/instancePools/{instancePoolId}",
                "UpdateInstancePoolRequest",
                "UpdateInstancePoolResponse",
            )
            .with_description("Update the specified instance pool, e.g. its size"),
        );

    builder
        .record(instance_list_request("ListInstancePoolInstancesRequest", "instancePoolId"))
        .record(common::list_response(
            "ListInstancePoolInstancesResponse",
            "InstanceSummary",
        ))
        .operation(Operation::new(
            LIST_INSTANCE_POOL_INSTANCES,
            RestMethod::Get,
            "/instancePools/{instancePoolId}/instances",
            "ListInstancePoolInstancesRequest",
            "ListInstancePoolInstancesResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("DetachInstancePoolInstanceRequest")
                .field(FieldDescriptor::path("instancePoolId", ValueKind::string()))
                .field(
                    FieldDescriptor::body(
                        "detachInstancePoolInstanceDetails",
                        ValueKind::record("DetachInstancePoolInstanceDetails"),
                    )
                    .required(),
                )
                .field(common::opc_retry_token())
                .field(common::if_match())
                .field(common::opc_request_id()),
        )
        .record(
            common::empty_response("DetachInstancePoolInstanceResponse").field(
                FieldDescriptor::header("opc-work-request-id", ValueKind::string())
                    .named("opcWorkRequestId"),
            ),
        )
        .operation(Operation::new(
            DETACH_INSTANCE_POOL_INSTANCE,
            RestMethod::Post,
            "/instancePools/{instancePoolId}/actions/detachInstance",
            "DetachInstancePoolInstanceRequest",
            "DetachInstancePoolInstanceResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("GetClusterNetworkRequest")
                .field(FieldDescriptor::path("clusterNetworkId", ValueKind::string()))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response(
            "GetClusterNetworkResponse",
            "clusterNetwork",
            "ClusterNetwork",
        ))
        .operation(Operation::new(
            GET_CLUSTER_NETWORK,
            RestMethod::Get,
            "/clusterNetworks/{clusterNetworkId}",
            "GetClusterNetworkRequest",
            "GetClusterNetworkResponse",
        ));

    builder
        .record(instance_list_request(
            "ListClusterNetworkInstancesRequest",
            "clusterNetworkId",
        ))
        .record(common::list_response(
            "ListClusterNetworkInstancesResponse",
            "InstanceSummary",
        ))
        .operation(Operation::new(
            LIST_CLUSTER_NETWORK_INSTANCES,
            RestMethod::Get,
            "/clusterNetworks/{clusterNetworkId}/instances",
            "ListClusterNetworkInstancesRequest",
            "ListClusterNetworkInstancesResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("GetComputeCapacityReservationRequest")
                .field(FieldDescriptor::path("capacityReservationId", ValueKind::string()))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response(
            "GetComputeCapacityReservationResponse",
            "computeCapacityReservation",
            "ComputeCapacityReservation",
        ))
        .operation(Operation::new(
            GET_COMPUTE_CAPACITY_RESERVATION,
            RestMethod::Get,
            "/computeCapacityReservations/{capacityReservationId}",
            "GetComputeCapacityReservationRequest",
            "GetComputeCapacityReservationResponse",
        ));
}

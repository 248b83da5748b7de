//! Compute instances and their lifecycle operations.

use coreapi_define::prelude::*;

use super::platform::{LAUNCH_PLATFORM_CONFIG, PLATFORM_CONFIG};
use crate::common;

/// Instance lifecycle enum.
pub const INSTANCE_LIFECYCLE_STATE: &str = "InstanceLifecycleState";

/// Power action enum accepted by [`INSTANCE_ACTION`].
pub const INSTANCE_ACTION_TYPE: &str = "InstanceActionType";

/// `GET /instances`
pub const LIST_INSTANCES: &str = "ListInstances";
/// `GET /instances/{instanceId}`
pub const GET_INSTANCE: &str = "GetInstance";
/// `POST /instances/{instanceId}?action=...`
pub const INSTANCE_ACTION: &str = "InstanceAction";
/// `DELETE /instances/{instanceId}`
pub const TERMINATE_INSTANCE: &str = "TerminateInstance";
/// `POST /instances`
pub const LAUNCH_INSTANCE: &str = "LaunchInstance";

/// Registers instance records, enums and operations.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder
        .enumeration(EnumDescriptor::new(
            INSTANCE_LIFECYCLE_STATE,
            [
                "MOVING",
                "PROVISIONING",
                "RUNNING",
                "STARTING",
                "STOPPING",
                "STOPPED",
                "CREATING_IMAGE",
                "TERMINATING",
                "TERMINATED",
            ],
        ))
        .enumeration(EnumDescriptor::new(
            INSTANCE_ACTION_TYPE,
            [
                "STOP",
                "START",
                "SOFTRESET",
                "RESET",
                "SOFTSTOP",
                "SENDDIAGNOSTICINTERRUPT",
                "DIAGNOSTICREBOOT",
                "REBOOTMIGRATE",
            ],
        ));

    builder.records([
        RecordDescriptor::new("InstanceShapeConfig").fields([
            FieldDescriptor::body("ocpus", ValueKind::float32()),
            FieldDescriptor::body("memoryInGBs", ValueKind::float32()),
            FieldDescriptor::body("vcpus", ValueKind::int32()),
            FieldDescriptor::body("processorDescription", ValueKind::string()),
            FieldDescriptor::body("networkingBandwidthInGbps", ValueKind::float32()),
            FieldDescriptor::body("maxVnicAttachments", ValueKind::int32()),
            FieldDescriptor::body("gpus", ValueKind::int32()),
            FieldDescriptor::body("gpuDescription", ValueKind::string()),
            FieldDescriptor::body("localDisks", ValueKind::int32()),
            FieldDescriptor::body("localDisksTotalSizeInGBs", ValueKind::float32()),
        ]),
        RecordDescriptor::new("LaunchInstanceShapeConfigDetails").fields([
            FieldDescriptor::body("ocpus", ValueKind::float32()),
            FieldDescriptor::body("vcpus", ValueKind::int32()),
            FieldDescriptor::body("memoryInGBs", ValueKind::float32()),
        ]),
        RecordDescriptor::new("Instance")
            .with_description("A compute host")
            .fields([
                FieldDescriptor::body("availabilityDomain", ValueKind::string()).required(),
                FieldDescriptor::body("capacityReservationId", ValueKind::string()),
                FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
                common::defined_tags(),
                FieldDescriptor::body("displayName", ValueKind::string()),
                FieldDescriptor::body("extendedMetadata", ValueKind::mapping_of(ValueKind::Opaque)),
                FieldDescriptor::body("faultDomain", ValueKind::string()),
                common::freeform_tags(),
                FieldDescriptor::body("id", ValueKind::string()).required(),
                FieldDescriptor::body("imageId", ValueKind::string()),
                FieldDescriptor::body(
                    "lifecycleState",
                    ValueKind::enumeration(INSTANCE_LIFECYCLE_STATE),
                )
                .required(),
                FieldDescriptor::body("metadata", ValueKind::string_map()),
                FieldDescriptor::body("region", ValueKind::string()).required(),
                FieldDescriptor::body("shape", ValueKind::string()).required(),
                FieldDescriptor::body("shapeConfig", ValueKind::record("InstanceShapeConfig")),
                FieldDescriptor::body("platformConfig", ValueKind::polymorphic(PLATFORM_CONFIG)),
                FieldDescriptor::body("timeCreated", ValueKind::timestamp()).required(),
                FieldDescriptor::body("timeMaintenanceRebootDue", ValueKind::timestamp()),
            ]),
        RecordDescriptor::new("LaunchInstanceDetails").fields([
            FieldDescriptor::body("availabilityDomain", ValueKind::string()).required(),
            FieldDescriptor::body("capacityReservationId", ValueKind::string()),
            FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
            common::defined_tags(),
            FieldDescriptor::body("displayName", ValueKind::string()),
            FieldDescriptor::body("faultDomain", ValueKind::string()),
            common::freeform_tags(),
            FieldDescriptor::body("imageId", ValueKind::string()),
            FieldDescriptor::body("metadata", ValueKind::string_map()),
            FieldDescriptor::body("shape", ValueKind::string()).required(),
            FieldDescriptor::body(
                "shapeConfig",
                ValueKind::record("LaunchInstanceShapeConfigDetails"),
            ),
            FieldDescriptor::body(
                "platformConfig",
                ValueKind::polymorphic(LAUNCH_PLATFORM_CONFIG),
            ),
            FieldDescriptor::body("subnetId", ValueKind::string()),
        ]),
    ]);

    // ListInstances
    builder
        .record(
            RecordDescriptor::new("ListInstancesRequest")
                .field(common::compartment_query())
                .field(FieldDescriptor::query("availabilityDomain", ValueKind::string()))
                .field(FieldDescriptor::query("capacityReservationId", ValueKind::string()))
                .field(FieldDescriptor::query("displayName", ValueKind::string()))
                .fields(common::pagination())
                .fields(common::sorting())
                .field(FieldDescriptor::query(
                    "lifecycleState",
                    ValueKind::enumeration(INSTANCE_LIFECYCLE_STATE),
                ))
                .field(common::opc_request_id()),
        )
        .record(common::list_response("ListInstancesResponse", "Instance"))
        .operation(
            Operation::new(
                LIST_INSTANCES,
                RestMethod::Get,
                "/instances",
                "ListInstancesRequest",
                "ListInstancesResponse",
            )
            .with_description("Lists the instances in the specified compartment"),
        );

    // GetInstance
    builder
        .record(
            RecordDescriptor::new("GetInstanceRequest")
                .field(FieldDescriptor::path("instanceId", ValueKind::string()))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response("GetInstanceResponse", "instance", "Instance"))
        .operation(Operation::new(
            GET_INSTANCE,
            RestMethod::Get,
            "/instances/{instanceId}",
            "GetInstanceRequest",
            "GetInstanceResponse",
        ));

    // InstanceAction
    builder
        .record(
            RecordDescriptor::new("InstanceActionRequest")
                .field(FieldDescriptor::path("instanceId", ValueKind::string()))
                .field(
                    FieldDescriptor::query("action", ValueKind::enumeration(INSTANCE_ACTION_TYPE))
                        .required(),
                )
                .field(common::opc_retry_token())
                .field(common::if_match())
                .field(common::opc_request_id()),
        )
        .record(common::entity_response("InstanceActionResponse", "instance", "Instance"))
        .operation(
            Operation::new(
                INSTANCE_ACTION,
                RestMethod::Post,
                "/instances/{instanceId}",
                "InstanceActionRequest",
                "InstanceActionResponse",
            )
            .with_description("Performs a power action on the specified instance"),
        );

    // TerminateInstance
    builder
        .record(
            RecordDescriptor::new("TerminateInstanceRequest")
                .field(FieldDescriptor::path("instanceId", ValueKind::string()))
                .field(common::if_match())
                .field(FieldDescriptor::query("preserveBootVolume", ValueKind::boolean()))
                .field(common::opc_request_id()),
        )
        .record(common::empty_response("TerminateInstanceResponse"))
        .operation(Operation::new(
            TERMINATE_INSTANCE,
            RestMethod::Delete,
            "/instances/{instanceId}",
            "TerminateInstanceRequest",
            "TerminateInstanceResponse",
        ));

    // LaunchInstance
    builder
        .record(
            RecordDescriptor::new("LaunchInstanceRequest")
                .field(
                    FieldDescriptor::body(
                        "launchInstanceDetails",
                        ValueKind::record("LaunchInstanceDetails"),
                    )
                    .required(),
                )
                .field(common::opc_retry_token())
                .field(common::opc_request_id()),
        )
        .record(common::entity_response("LaunchInstanceResponse", "instance", "Instance"))
        .operation(Operation::new(
            LAUNCH_INSTANCE,
            RestMethod::Post,
            "/instances",
            "LaunchInstanceRequest",
            "LaunchInstanceResponse",
        ));
}

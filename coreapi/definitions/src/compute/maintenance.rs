//! Instance maintenance events.

use coreapi_define::prelude::*;

use crate::common;

/// `GET /instanceMaintenanceEvents`
pub const LIST_INSTANCE_MAINTENANCE_EVENTS: &str = "ListInstanceMaintenanceEvents";
/// `GET /instanceMaintenanceEvents/{instanceMaintenanceEventId}`
pub const GET_INSTANCE_MAINTENANCE_EVENT: &str = "GetInstanceMaintenanceEvent";

/// Maintenance event lifecycle enum.
pub const MAINTENANCE_LIFECYCLE_STATE: &str = "InstanceMaintenanceEventLifecycleState";

/// Registers maintenance event records, enums and operations.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder
        .enumeration(EnumDescriptor::new(
            "InstanceMaintenanceEventMaintenanceCategory",
            ["EMERGENCY", "MANDATORY", "FLEXIBLE", "OPTIONAL", "NOTIFICATION"],
        ))
        .enumeration(EnumDescriptor::new(
            "InstanceMaintenanceEventMaintenanceReason",
            [
                "EVACUATION",
                "ENVIRONMENTAL_FACTORS",
                "DECOMMISSION",
                "HARDWARE_REPLACEMENT",
                "FIRMWARE_UPDATE",
                "SECURITY_UPDATE",
            ],
        ))
        .enumeration(EnumDescriptor::new(
            "InstanceMaintenanceEventInstanceAction",
            ["REBOOT_MIGRATION", "TERMINATE", "STOP", "NONE"],
        ))
        .enumeration(EnumDescriptor::new(
            "InstanceMaintenanceAlternativeResolutionAction",
            ["REBOOT_MIGRATION", "TERMINATE"],
        ))
        .enumeration(EnumDescriptor::new(
            MAINTENANCE_LIFECYCLE_STATE,
            ["SCHEDULED", "STARTED", "PROCESSING", "SUCCEEDED", "FAILED", "CANCELED"],
        ))
        .enumeration(EnumDescriptor::new(
            "InstanceMaintenanceEventCreatedBy",
            ["CUSTOMER", "SYSTEM"],
        ));

    builder.record(
        RecordDescriptor::new("InstanceMaintenanceEvent")
            .with_description("A planned maintenance event affecting one instance")
            .fields([
                FieldDescriptor::body("id", ValueKind::string()).required(),
                FieldDescriptor::body("instanceId", ValueKind::string()).required(),
                FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
                FieldDescriptor::body(
                    "maintenanceCategory",
                    ValueKind::enumeration("InstanceMaintenanceEventMaintenanceCategory"),
                )
                .required(),
                FieldDescriptor::body(
                    "maintenanceReason",
                    ValueKind::enumeration("InstanceMaintenanceEventMaintenanceReason"),
                )
                .required(),
                FieldDescriptor::body(
                    "instanceAction",
                    ValueKind::enumeration("InstanceMaintenanceEventInstanceAction"),
                )
                .required(),
                FieldDescriptor::body(
                    "alternativeResolutionActions",
                    ValueKind::sequence_of(ValueKind::enumeration(
                        "InstanceMaintenanceAlternativeResolutionAction",
                    )),
                )
                .required(),
                FieldDescriptor::body("timeWindowStart", ValueKind::timestamp()).required(),
                FieldDescriptor::body("canDeleteLocalStorage", ValueKind::boolean()),
                FieldDescriptor::body("canReschedule", ValueKind::boolean()).required(),
                FieldDescriptor::body("timeCreated", ValueKind::timestamp()).required(),
                FieldDescriptor::body(
                    "lifecycleState",
                    ValueKind::enumeration(MAINTENANCE_LIFECYCLE_STATE),
                )
                .required(),
                FieldDescriptor::body("lifecycleDetails", ValueKind::string()),
                FieldDescriptor::body("timeStarted", ValueKind::timestamp()),
                FieldDescriptor::body("timeFinished", ValueKind::timestamp()),
                FieldDescriptor::body("startWindowDuration", ValueKind::string()),
                FieldDescriptor::body("estimatedDuration", ValueKind::string()),
                FieldDescriptor::body("timeHardDueDate", ValueKind::timestamp()),
                FieldDescriptor::body("displayName", ValueKind::string()),
                common::defined_tags(),
                common::freeform_tags(),
                FieldDescriptor::body(
                    "createdBy",
                    ValueKind::enumeration("InstanceMaintenanceEventCreatedBy"),
                )
                .required(),
                FieldDescriptor::body("description", ValueKind::string()),
                FieldDescriptor::body("correlationToken", ValueKind::string()),
                FieldDescriptor::body("additionalDetails", ValueKind::string_map()),
            ]),
    );

    builder
        .record(
            RecordDescriptor::new("ListInstanceMaintenanceEventsRequest")
                .field(common::compartment_query())
                .field(FieldDescriptor::query("instanceId", ValueKind::string()))
                .field(FieldDescriptor::query(
                    "lifecycleState",
                    ValueKind::enumeration(MAINTENANCE_LIFECYCLE_STATE),
                ))
                .field(FieldDescriptor::query("correlationToken", ValueKind::string()))
                .field(FieldDescriptor::query("instanceAction", ValueKind::string()))
                .field(FieldDescriptor::query(
                    "timeWindowStartGreaterThanOrEqualTo",
                    ValueKind::timestamp(),
                ))
                .field(FieldDescriptor::query(
                    "timeWindowStartLessThanOrEqualTo",
                    ValueKind::timestamp(),
                ))
                .fields(common::pagination())
                .fields(common::sorting())
                .field(common::opc_request_id()),
        )
        .record(common::list_response(
            "ListInstanceMaintenanceEventsResponse",
            "InstanceMaintenanceEvent",
        ))
        .operation(
            Operation::new(
                LIST_INSTANCE_MAINTENANCE_EVENTS,
                RestMethod::Get,
                "/instanceMaintenanceEvents",
                "ListInstanceMaintenanceEventsRequest",
                "ListInstanceMaintenanceEventsResponse",
            )
            .with_description("Gets a list of all the maintenance events for the given compartment"),
        );

    builder
        .record(
            RecordDescriptor::new("GetInstanceMaintenanceEventRequest")
                .field(FieldDescriptor::path(
                    "instanceMaintenanceEventId",
                    ValueKind::string(),
                ))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response(
            "GetInstanceMaintenanceEventResponse",
            "instanceMaintenanceEvent",
            "InstanceMaintenanceEvent",
        ))
        .operation(Operation::new(
            GET_INSTANCE_MAINTENANCE_EVENT,
            RestMethod::Get,
            "/instanceMaintenanceEvents/{instanceMaintenanceEventId}",
            "GetInstanceMaintenanceEventRequest",
            "GetInstanceMaintenanceEventResponse",
        ));
}

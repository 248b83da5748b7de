//! Block volumes.

use coreapi_define::prelude::*;

use crate::common;

/// `GET /volumes/{volumeId}`
pub const GET_VOLUME: &str = "GetVolume";
/// `GET /volumes`
pub const LIST_VOLUMES: &str = "ListVolumes";

/// Volume lifecycle enum.
pub const VOLUME_LIFECYCLE_STATE: &str = "VolumeLifecycleState";

/// Registers volume schemas and operations.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder.enumeration(EnumDescriptor::new(
        VOLUME_LIFECYCLE_STATE,
        ["PROVISIONING", "RESTORING", "AVAILABLE", "TERMINATING", "TERMINATED", "FAULTY"],
    ));

    builder.record(
        RecordDescriptor::new("Volume")
            .with_description("A detachable block volume device")
            .fields([
                FieldDescriptor::body("availabilityDomain", ValueKind::string()).required(),
                FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
                common::defined_tags(),
                FieldDescriptor::body("displayName", ValueKind::string()).required(),
                common::freeform_tags(),
                FieldDescriptor::body("id", ValueKind::string()).required(),
                FieldDescriptor::body("isHydrated", ValueKind::boolean()),
                FieldDescriptor::body("isAutoTuneEnabled", ValueKind::boolean()),
                FieldDescriptor::body("kmsKeyId", ValueKind::string()),
                FieldDescriptor::body(
                    "lifecycleState",
                    ValueKind::enumeration(VOLUME_LIFECYCLE_STATE),
                )
                .required(),
                FieldDescriptor::body("vpusPerGB", ValueKind::int64()),
                FieldDescriptor::body("sizeInGBs", ValueKind::int64()),
                FieldDescriptor::body("sizeInMBs", ValueKind::int64()).required(),
                FieldDescriptor::body("timeCreated", ValueKind::timestamp()).required(),
                FieldDescriptor::body("volumeGroupId", ValueKind::string()),
            ]),
    );

    builder
        .record(
            RecordDescriptor::new("GetVolumeRequest")
                .field(FieldDescriptor::path("volumeId", ValueKind::string()))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response("GetVolumeResponse", "volume", "Volume"))
        .operation(Operation::new(
            GET_VOLUME,
            RestMethod::Get,
            "/volumes/{volumeId}",
            "GetVolumeRequest",
            "GetVolumeResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("ListVolumesRequest")
                .field(FieldDescriptor::query("availabilityDomain", ValueKind::string()))
                .field(FieldDescriptor::query("compartmentId", ValueKind::string()))
                .fields(common::pagination())
                .field(FieldDescriptor::query("displayName", ValueKind::string()))
                .fields(common::sorting())
                .field(FieldDescriptor::query("volumeGroupId", ValueKind::string()))
                .field(FieldDescriptor::query(
                    "lifecycleState",
                    ValueKind::enumeration(VOLUME_LIFECYCLE_STATE),
                ))
                .field(common::opc_request_id()),
        )
        .record(common::list_response("ListVolumesResponse", "Volume"))
        .operation(Operation::new(
            LIST_VOLUMES,
            RestMethod::Get,
            "/volumes",
            "ListVolumesRequest",
            "ListVolumesResponse",
        ));
}

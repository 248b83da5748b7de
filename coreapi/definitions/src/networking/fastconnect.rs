//! FastConnect virtual circuits.

use coreapi_define::prelude::*;

use crate::common;

/// `GET /virtualCircuits/{virtualCircuitId}`
pub const GET_VIRTUAL_CIRCUIT: &str = "GetVirtualCircuit";
/// `GET /virtualCircuits`
pub const LIST_VIRTUAL_CIRCUITS: &str = "ListVirtualCircuits";

/// Virtual circuit lifecycle enum.
pub const VIRTUAL_CIRCUIT_LIFECYCLE_STATE: &str = "VirtualCircuitLifecycleState";

/// Registers virtual circuit schemas and operations.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder
        .enumeration(EnumDescriptor::new(
            "VirtualCircuitBgpManagement",
            ["CUSTOMER_MANAGED", "PROVIDER_MANAGED", "ORACLE_MANAGED"],
        ))
        .enumeration(EnumDescriptor::new("VirtualCircuitBgpSessionState", ["UP", "DOWN"]))
        .enumeration(EnumDescriptor::new(
            VIRTUAL_CIRCUIT_LIFECYCLE_STATE,
            [
                "PENDING_PROVIDER",
                "VERIFYING",
                "PROVISIONING",
                "PROVISIONED",
                "FAILED",
                "INACTIVE",
                "TERMINATING",
                "TERMINATED",
            ],
        ))
        .enumeration(EnumDescriptor::new("VirtualCircuitProviderState", ["ACTIVE", "INACTIVE"]))
        .enumeration(EnumDescriptor::new(
            "VirtualCircuitServiceType",
            ["COLOCATED", "LAYER2", "LAYER3"],
        ))
        .enumeration(EnumDescriptor::new("VirtualCircuitType", ["PUBLIC", "PRIVATE"]))
        .enumeration(EnumDescriptor::new("VirtualCircuitIpMtu", ["MTU_1500", "MTU_9000"]))
        .enumeration(EnumDescriptor::new(
            "VirtualCircuitRoutingPolicy",
            ["ORACLE_SERVICE_NETWORK", "REGIONAL", "MARKET_LEVEL", "GLOBAL"],
        ));

    builder.records([
        RecordDescriptor::new("CrossConnectMapping").fields([
            FieldDescriptor::body("bgpMd5AuthKey", ValueKind::string()),
            FieldDescriptor::body("crossConnectOrCrossConnectGroupId", ValueKind::string()),
            FieldDescriptor::body("customerBgpPeeringIp", ValueKind::string()),
            FieldDescriptor::body("oracleBgpPeeringIp", ValueKind::string()),
            FieldDescriptor::body("customerBgpPeeringIpv6", ValueKind::string()),
            FieldDescriptor::body("oracleBgpPeeringIpv6", ValueKind::string()),
            FieldDescriptor::body("vlan", ValueKind::int32()),
        ]),
        RecordDescriptor::new("VirtualCircuit")
            .with_description("An isolated network path between a customer network and the cloud")
            .fields([
                FieldDescriptor::body("id", ValueKind::string()),
                FieldDescriptor::body("compartmentId", ValueKind::string()),
                FieldDescriptor::body("displayName", ValueKind::string()),
                FieldDescriptor::body("bandwidthShapeName", ValueKind::string()),
                FieldDescriptor::body(
                    "bgpManagement",
                    ValueKind::enumeration("VirtualCircuitBgpManagement"),
                ),
                FieldDescriptor::body(
                    "bgpSessionState",
                    ValueKind::enumeration("VirtualCircuitBgpSessionState"),
                ),
                FieldDescriptor::body(
                    "crossConnectMappings",
                    ValueKind::sequence_of(ValueKind::record("CrossConnectMapping")),
                ),
                FieldDescriptor::body(
                    "routingPolicy",
                    ValueKind::sequence_of(ValueKind::enumeration("VirtualCircuitRoutingPolicy")),
                ),
                FieldDescriptor::body("customerAsn", ValueKind::int64()),
                common::defined_tags(),
                common::freeform_tags(),
                FieldDescriptor::body("gatewayId", ValueKind::string()),
                FieldDescriptor::body("isBfdEnabled", ValueKind::boolean()),
                FieldDescriptor::body("ipMtu", ValueKind::enumeration("VirtualCircuitIpMtu")),
                FieldDescriptor::body(
                    "lifecycleState",
                    ValueKind::enumeration(VIRTUAL_CIRCUIT_LIFECYCLE_STATE),
                ),
                FieldDescriptor::body(
                    "providerState",
                    ValueKind::enumeration("VirtualCircuitProviderState"),
                ),
                FieldDescriptor::body("region", ValueKind::string()),
                FieldDescriptor::body(
                    "serviceType",
                    ValueKind::enumeration("VirtualCircuitServiceType"),
                ),
                FieldDescriptor::body("timeCreated", ValueKind::timestamp()),
                FieldDescriptor::body("type", ValueKind::enumeration("VirtualCircuitType")),
            ]),
    ]);

    builder
        .record(
            RecordDescriptor::new("GetVirtualCircuitRequest")
                .field(FieldDescriptor::path("virtualCircuitId", ValueKind::string()))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response(
            "GetVirtualCircuitResponse",
            "virtualCircuit",
            "VirtualCircuit",
        ))
        .operation(Operation::new(
            GET_VIRTUAL_CIRCUIT,
            RestMethod::Get,
            "/virtualCircuits/{virtualCircuitId}",
            "GetVirtualCircuitRequest",
            "GetVirtualCircuitResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("ListVirtualCircuitsRequest")
                .field(common::compartment_query())
                .fields(common::pagination())
                .field(FieldDescriptor::query("displayName", ValueKind::string()))
                .fields(common::sorting())
                .field(FieldDescriptor::query(
                    "lifecycleState",
                    ValueKind::enumeration(VIRTUAL_CIRCUIT_LIFECYCLE_STATE),
                ))
                .field(common::opc_request_id()),
        )
        .record(common::list_response("ListVirtualCircuitsResponse", "VirtualCircuit"))
        .operation(Operation::new(
            LIST_VIRTUAL_CIRCUITS,
            RestMethod::Get,
            "/virtualCircuits",
            "ListVirtualCircuitsRequest",
            "ListVirtualCircuitsResponse",
        ));
}

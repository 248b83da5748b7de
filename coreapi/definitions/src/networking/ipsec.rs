//! Site-to-site VPN: IPSec connections and their tunnels.

use coreapi_define::prelude::*;

use crate::common;

/// `POST /ipsecConnections`
pub const CREATE_IPSEC_CONNECTION: &str = "CreateIPSecConnection";
/// `GET /ipsecConnections/{ipscId}/tunnels/{tunnelId}`
pub const GET_IPSEC_CONNECTION_TUNNEL: &str = "GetIPSecConnectionTunnel";
/// `GET /ipsecConnections/{ipscId}/tunnels`
pub const LIST_IPSEC_CONNECTION_TUNNELS: &str = "ListIPSecConnectionTunnels";

/// IKE protocol version enum.
pub const IKE_VERSION: &str = "IpSecTunnelIkeVersion";
/// Which side may initiate the tunnel.
pub const ORACLE_INITIATION: &str = "IpSecTunnelOracleInitiation";
/// Phase two encryption algorithms.
pub const PHASE_TWO_ENCRYPTION: &str = "PhaseTwoEncryptionAlgorithm";

const ENUMS: &[(&str, &[&str])] = &[
    (
        "IpSecConnectionLifecycleState",
        &["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
    ),
    ("IpSecConnectionCpeLocalIdentifierType", &["IP_ADDRESS", "HOSTNAME"]),
    ("IpSecConnectionTransportType", &["INTERNET", "FASTCONNECT"]),
    (
        "IpSecConnectionTunnelStatus",
        &["UP", "DOWN", "DOWN_FOR_MAINTENANCE", "PARTIAL_UP"],
    ),
    (
        "IpSecConnectionTunnelLifecycleState",
        &["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
    ),
    (IKE_VERSION, &["V1", "V2"]),
    ("IpSecTunnelRouting", &["BGP", "STATIC", "POLICY"]),
    (ORACLE_INITIATION, &["INITIATOR_OR_RESPONDER", "RESPONDER_ONLY"]),
    ("IpSecTunnelNatTranslationEnabled", &["ENABLED", "DISABLED", "AUTO"]),
    ("IpSecTunnelDpdMode", &["INITIATE_AND_RESPOND", "RESPOND_ONLY"]),
    ("BgpSessionState", &["UP", "DOWN"]),
    ("PhaseOneAuthenticationAlgorithm", &["SHA2_384", "SHA2_256", "SHA1_96"]),
    ("PhaseOneEncryptionAlgorithm", &["AES_256_CBC", "AES_192_CBC", "AES_128_CBC"]),
    (
        "DiffieHellmanGroup",
        &["GROUP2", "GROUP5", "GROUP14", "GROUP19", "GROUP20", "GROUP24"],
    ),
    ("PhaseTwoAuthenticationAlgorithm", &["HMAC_SHA2_256_128", "HMAC_SHA1_128"]),
    (
        PHASE_TWO_ENCRYPTION,
        &[
            "AES_256_GCM",
            "AES_192_GCM",
            "AES_128_GCM",
            "AES_256_CBC",
            "AES_192_CBC",
            "AES_128_CBC",
        ],
    ),
];

fn enum_field(name: &str, enum_name: &str) -> FieldDescriptor {
    FieldDescriptor::body(name, ValueKind::enumeration(enum_name))
}

/// Registers IPSec schemas and operations.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    for (name, values) in ENUMS {
        builder.enumeration(EnumDescriptor::new(*name, values.iter().copied()));
    }

    builder.records([
        RecordDescriptor::new("BgpSessionInfo").fields([
            FieldDescriptor::body("oracleInterfaceIp", ValueKind::string()),
            FieldDescriptor::body("customerInterfaceIp", ValueKind::string()),
            FieldDescriptor::body("oracleBgpAsn", ValueKind::string()),
            FieldDescriptor::body("customerBgpAsn", ValueKind::string()),
            enum_field("bgpState", "BgpSessionState").required(),
        ]),
        RecordDescriptor::new("TunnelPhaseOneDetails").fields([
            FieldDescriptor::body("isCustomPhaseOneConfig", ValueKind::boolean()),
            FieldDescriptor::body("lifetime", ValueKind::int64()),
            FieldDescriptor::body("remainingLifetime", ValueKind::int64()),
            FieldDescriptor::body("customAuthenticationAlgorithm", ValueKind::string()),
            FieldDescriptor::body("negotiatedAuthenticationAlgorithm", ValueKind::string()),
            FieldDescriptor::body("customEncryptionAlgorithm", ValueKind::string()),
            FieldDescriptor::body("negotiatedEncryptionAlgorithm", ValueKind::string()),
            FieldDescriptor::body("customDhGroup", ValueKind::string()),
            FieldDescriptor::body("negotiatedDhGroup", ValueKind::string()),
            FieldDescriptor::body("isIkeEstablished", ValueKind::boolean()),
            FieldDescriptor::body("remainingLifetimeLastRetrieved", ValueKind::timestamp()),
        ]),
        RecordDescriptor::new("TunnelPhaseTwoDetails").fields([
            FieldDescriptor::body("isCustomPhaseTwoConfig", ValueKind::boolean()),
            FieldDescriptor::body("lifetime", ValueKind::int64()),
            FieldDescriptor::body("remainingLifetime", ValueKind::int64()),
            FieldDescriptor::body("customAuthenticationAlgorithm", ValueKind::string()),
            FieldDescriptor::body("negotiatedAuthenticationAlgorithm", ValueKind::string()),
            FieldDescriptor::body("customEncryptionAlgorithm", ValueKind::string()),
            FieldDescriptor::body("negotiatedEncryptionAlgorithm", ValueKind::string()),
            FieldDescriptor::body("dhGroup", ValueKind::string()),
            FieldDescriptor::body("negotiatedDhGroup", ValueKind::string()),
            FieldDescriptor::body("isEspEstablished", ValueKind::boolean()),
            FieldDescriptor::body("isPfsEnabled", ValueKind::boolean()),
            FieldDescriptor::body("remainingLifetimeLastRetrieved", ValueKind::timestamp()),
        ]),
        RecordDescriptor::new("IPSecConnectionTunnel")
            .with_description("Information about a single IPSec tunnel")
            .fields([
                FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
                FieldDescriptor::body("id", ValueKind::string()).required(),
                FieldDescriptor::body("vpnIp", ValueKind::string()),
                FieldDescriptor::body("cpeIp", ValueKind::string()),
                enum_field("status", "IpSecConnectionTunnelStatus"),
                enum_field("ikeVersion", IKE_VERSION),
                enum_field("lifecycleState", "IpSecConnectionTunnelLifecycleState").required(),
                FieldDescriptor::body("displayName", ValueKind::string()),
                FieldDescriptor::body("bgpSessionInfo", ValueKind::record("BgpSessionInfo")),
                enum_field("oracleCanInitiate", ORACLE_INITIATION),
                enum_field("natTranslationEnabled", "IpSecTunnelNatTranslationEnabled"),
                enum_field("dpdMode", "IpSecTunnelDpdMode"),
                FieldDescriptor::body("dpdTimeoutInSec", ValueKind::int32()),
                FieldDescriptor::body("phaseOneDetails", ValueKind::record("TunnelPhaseOneDetails")),
                FieldDescriptor::body("phaseTwoDetails", ValueKind::record("TunnelPhaseTwoDetails")),
                enum_field("routing", "IpSecTunnelRouting"),
                FieldDescriptor::body("timeCreated", ValueKind::timestamp()),
                FieldDescriptor::body("timeStatusUpdated", ValueKind::timestamp()),
            ]),
        RecordDescriptor::new("CreateIPSecTunnelBgpSessionDetails").fields([
            FieldDescriptor::body("oracleInterfaceIp", ValueKind::string()),
            FieldDescriptor::body("customerInterfaceIp", ValueKind::string()),
            FieldDescriptor::body("customerBgpAsn", ValueKind::string()),
        ]),
        RecordDescriptor::new("PhaseOneConfigDetails").fields([
            FieldDescriptor::body("isCustomPhaseOneConfig", ValueKind::boolean()),
            enum_field("authenticationAlgorithm", "PhaseOneAuthenticationAlgorithm"),
            enum_field("encryptionAlgorithm", "PhaseOneEncryptionAlgorithm"),
            enum_field("diffieHelmanGroup", "DiffieHellmanGroup"),
            FieldDescriptor::body("lifetimeInSeconds", ValueKind::int32()),
        ]),
        RecordDescriptor::new("PhaseTwoConfigDetails").fields([
            FieldDescriptor::body("isCustomPhaseTwoConfig", ValueKind::boolean()),
            enum_field("authenticationAlgorithm", "PhaseTwoAuthenticationAlgorithm"),
            enum_field("encryptionAlgorithm", PHASE_TWO_ENCRYPTION),
            FieldDescriptor::body("lifetimeInSeconds", ValueKind::int32()),
            FieldDescriptor::body("isPfsEnabled", ValueKind::boolean()),
            enum_field("pfsDhGroup", "DiffieHellmanGroup"),
        ]),
        RecordDescriptor::new("DpdConfig").fields([
            enum_field("dpdMode", "IpSecTunnelDpdMode"),
            FieldDescriptor::body("dpdTimeoutInSec", ValueKind::int32()),
        ]),
        RecordDescriptor::new("CreateIPSecConnectionTunnelDetails").fields([
            FieldDescriptor::body("displayName", ValueKind::string()),
            enum_field("routing", "IpSecTunnelRouting"),
            enum_field("ikeVersion", IKE_VERSION),
            FieldDescriptor::body("sharedSecret", ValueKind::string()),
            FieldDescriptor::body(
                "bgpSessionConfig",
                ValueKind::record("CreateIPSecTunnelBgpSessionDetails"),
            ),
            enum_field("oracleInitiation", ORACLE_INITIATION),
            enum_field("natTranslationEnabled", "IpSecTunnelNatTranslationEnabled"),
            FieldDescriptor::body("phaseOneConfig", ValueKind::record("PhaseOneConfigDetails")),
            FieldDescriptor::body("phaseTwoConfig", ValueKind::record("PhaseTwoConfigDetails")),
            FieldDescriptor::body("dpdConfig", ValueKind::record("DpdConfig")),
        ]),
        RecordDescriptor::new("CreateIPSecConnectionDetails").fields([
            FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
            FieldDescriptor::body("cpeId", ValueKind::string()).required(),
            common::defined_tags(),
            FieldDescriptor::body("displayName", ValueKind::string()),
            FieldDescriptor::body("drgId", ValueKind::string()).required(),
            common::freeform_tags(),
            FieldDescriptor::body("cpeLocalIdentifier", ValueKind::string()),
            enum_field("cpeLocalIdentifierType", "IpSecConnectionCpeLocalIdentifierType"),
            FieldDescriptor::body("staticRoutes", ValueKind::sequence_of(ValueKind::string()))
                .required()
                .keep_empty(),
            FieldDescriptor::body(
                "tunnelConfiguration",
                ValueKind::sequence_of(ValueKind::record("CreateIPSecConnectionTunnelDetails")),
            ),
        ]),
        RecordDescriptor::new("IPSecConnection").fields([
            FieldDescriptor::body("compartmentId", ValueKind::string()).required(),
            FieldDescriptor::body("cpeId", ValueKind::string()).required(),
            common::defined_tags(),
            FieldDescriptor::body("displayName", ValueKind::string()),
            FieldDescriptor::body("drgId", ValueKind::string()).required(),
            common::freeform_tags(),
            FieldDescriptor::body("id", ValueKind::string()).required(),
            enum_field("lifecycleState", "IpSecConnectionLifecycleState").required(),
            FieldDescriptor::body("cpeLocalIdentifier", ValueKind::string()),
            enum_field("cpeLocalIdentifierType", "IpSecConnectionCpeLocalIdentifierType"),
            FieldDescriptor::body("staticRoutes", ValueKind::sequence_of(ValueKind::string()))
                .required()
                .keep_empty(),
            FieldDescriptor::body("timeCreated", ValueKind::timestamp()),
            enum_field("transportType", "IpSecConnectionTransportType"),
        ]),
    ]);

    builder
        .record(
            RecordDescriptor::new("CreateIPSecConnectionRequest")
                .field(
                    FieldDescriptor::body(
                        "createIPSecConnectionDetails",
                        ValueKind::record("CreateIPSecConnectionDetails"),
                    )
                    .required(),
                )
                .field(common::opc_retry_token())
                .field(common::opc_request_id()),
        )
        .record(common::entity_response(
            "CreateIPSecConnectionResponse",
            "ipSecConnection",
            "IPSecConnection",
        ))
        .operation(
            Operation::new(
                CREATE_IPSEC_CONNECTION,
                RestMethod::Post,
                "/ipsecConnections",
                "CreateIPSecConnectionRequest",
                "CreateIPSecConnectionResponse",
            )
            .with_description("Creates a new IPSec connection between a DRG and a CPE"),
        );

    builder
        .record(
            RecordDescriptor::new("GetIPSecConnectionTunnelRequest")
                .field(FieldDescriptor::path("ipscId", ValueKind::string()))
                .field(FieldDescriptor::path("tunnelId", ValueKind::string()))
                .field(common::opc_request_id()),
        )
        .record(common::entity_response(
            "GetIPSecConnectionTunnelResponse",
            "ipSecConnectionTunnel",
            "IPSecConnectionTunnel",
        ))
        .operation(Operation::new(
            GET_IPSEC_CONNECTION_TUNNEL,
            RestMethod::Get,
            "/ipsecConnections/{ipscId}/tunnels/{tunnelId}",
            "GetIPSecConnectionTunnelRequest",
            "GetIPSecConnectionTunnelResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("ListIPSecConnectionTunnelsRequest")
                .field(FieldDescriptor::path("ipscId", ValueKind::string()))
                .fields(common::pagination())
                .field(common::opc_request_id()),
        )
        .record(common::list_response(
            "ListIPSecConnectionTunnelsResponse",
            "IPSecConnectionTunnel",
        ))
        .operation(Operation::new(
            LIST_IPSEC_CONNECTION_TUNNELS,
            RestMethod::Get,
            "/ipsecConnections/{ipscId}/tunnels",
            "ListIPSecConnectionTunnelsRequest",
            "ListIPSecConnectionTunnelsResponse",
        ));
}

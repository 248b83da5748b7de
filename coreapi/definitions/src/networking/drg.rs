//! Dynamic routing gateway route distributions.
//!
//! Route distribution statements select DRG attachments through polymorphic
//! match criteria keyed by `matchType`. The statement's own `action` is a
//! plain mandatory enum.

use coreapi_define::prelude::*;

use crate::common;

/// Polymorphic base of route distribution match criteria.
pub const MATCH_CRITERIA: &str = "DrgRouteDistributionMatchCriteria";

/// Discriminator enum of [`MATCH_CRITERIA`].
pub const MATCH_TYPE: &str = "DrgRouteDistributionMatchCriteriaMatchType";

/// Statement action enum.
pub const STATEMENT_ACTION: &str = "DrgRouteDistributionStatementAction";

/// Attachment type enum used by `DRG_ATTACHMENT_TYPE` criteria.
pub const DRG_ATTACHMENT_TYPE: &str = "DrgAttachmentType";

/// Route distribution statement record.
pub const STATEMENT: &str = "DrgRouteDistributionStatement";

/// `POST /drgRouteDistributions/{drgRouteDistributionId}/actions/addDrgRouteDistributionStatements`
pub const ADD_STATEMENTS: &str = "AddDrgRouteDistributionStatements";
/// `GET /drgRouteDistributions/{drgRouteDistributionId}/drgRouteDistributionStatements`
pub const LIST_STATEMENTS: &str = "ListDrgRouteDistributionStatements";

fn match_criteria() -> FieldDescriptor {
    FieldDescriptor::body(
        "matchCriteria",
        ValueKind::sequence_of(ValueKind::polymorphic(MATCH_CRITERIA)),
    )
}

/// Registers route distribution schemas and operations.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder
        .enumeration(EnumDescriptor::new(STATEMENT_ACTION, ["ACCEPT"]))
        .enumeration(EnumDescriptor::new(
            MATCH_TYPE,
            ["DRG_ATTACHMENT_TYPE", "DRG_ATTACHMENT_ID", "MATCH_ALL"],
        ))
        .enumeration(EnumDescriptor::new(
            DRG_ATTACHMENT_TYPE,
            ["VCN", "VIRTUAL_CIRCUIT", "REMOTE_PEERING_CONNECTION", "IPSEC_TUNNEL"],
        ));

    builder.records([
        RecordDescriptor::new(MATCH_CRITERIA)
            .with_description("The criteria by which a route distribution statement matches attachments")
            .polymorphic(
                Polymorphism::new("matchType")
                    .discriminator_enum(MATCH_TYPE)
                    .default_tag("MATCH_ALL")
                    .variant(
                        "DRG_ATTACHMENT_TYPE",
                        "DrgAttachmentTypeDrgRouteDistributionMatchCriteria",
                    )
                    .variant(
                        "DRG_ATTACHMENT_ID",
                        "DrgAttachmentIdDrgRouteDistributionMatchCriteria",
                    )
                    .variant(
                        "MATCH_ALL",
                        "DrgAttachmentMatchAllDrgRouteDistributionMatchCriteria",
                    ),
            ),
        RecordDescriptor::new("DrgAttachmentTypeDrgRouteDistributionMatchCriteria")
            .variant_of(MATCH_CRITERIA, "matchType", "DRG_ATTACHMENT_TYPE")
            .field(
                FieldDescriptor::body(
                    "attachmentType",
                    ValueKind::enumeration(DRG_ATTACHMENT_TYPE),
                )
                .required(),
            ),
        RecordDescriptor::new("DrgAttachmentIdDrgRouteDistributionMatchCriteria")
            .variant_of(MATCH_CRITERIA, "matchType", "DRG_ATTACHMENT_ID")
            .field(FieldDescriptor::body("drgAttachmentId", ValueKind::string()).required()),
        RecordDescriptor::new("DrgAttachmentMatchAllDrgRouteDistributionMatchCriteria")
            .variant_of(MATCH_CRITERIA, "matchType", "MATCH_ALL"),
        RecordDescriptor::new(STATEMENT)
            .with_description("A single statement within a route distribution")
            .fields([
                match_criteria(),
                FieldDescriptor::body("action", ValueKind::enumeration(STATEMENT_ACTION))
                    .required(),
                FieldDescriptor::body("priority", ValueKind::int32()),
                FieldDescriptor::body("id", ValueKind::string()),
            ]),
        RecordDescriptor::new("AddDrgRouteDistributionStatementDetails").fields([
            match_criteria().required(),
            FieldDescriptor::body("action", ValueKind::enumeration(STATEMENT_ACTION)).required(),
            FieldDescriptor::body("priority", ValueKind::int32()).required(),
        ]),
        RecordDescriptor::new("AddDrgRouteDistributionStatementsDetails").field(
            FieldDescriptor::body(
                "statements",
                ValueKind::sequence_of(ValueKind::record("AddDrgRouteDistributionStatementDetails")),
            )
            .required(),
        ),
    ]);

    builder
        .record(
            RecordDescriptor::new("AddDrgRouteDistributionStatementsRequest")
                .field(FieldDescriptor::path("drgRouteDistributionId", ValueKind::string()))
                .field(
                    FieldDescriptor::body(
                        "addDrgRouteDistributionStatementsDetails",
                        ValueKind::record("AddDrgRouteDistributionStatementsDetails"),
                    )
                    .required(),
                )
                .field(common::opc_request_id()),
        )
        .record(
            RecordDescriptor::new("AddDrgRouteDistributionStatementsResponse")
                .field(
                    FieldDescriptor::body("items", ValueKind::sequence_of(ValueKind::record(STATEMENT)))
                        .keep_empty(),
                )
                .field(common::opc_request_id()),
        )
        .operation(Operation::new(
            ADD_STATEMENTS,
            RestMethod::Post,
            "/drgRouteDistributions/{drgRouteDistributionId}/actions/addDrgRouteDistributionStatements",
            "AddDrgRouteDistributionStatementsRequest",
            "AddDrgRouteDistributionStatementsResponse",
        ));

    builder
        .record(
            RecordDescriptor::new("ListDrgRouteDistributionStatementsRequest")
                .field(FieldDescriptor::path("drgRouteDistributionId", ValueKind::string()))
                .fields(common::pagination())
                .fields(common::sorting())
                .field(common::opc_request_id()),
        )
        .record(common::list_response(
            "ListDrgRouteDistributionStatementsResponse",
            STATEMENT,
        ))
        .operation(Operation::new(
            LIST_STATEMENTS,
            RestMethod::Get,
            "/drgRouteDistributions/{drgRouteDistributionId}/drgRouteDistributionStatements",
            "ListDrgRouteDistributionStatementsRequest",
            "ListDrgRouteDistributionStatementsResponse",
        ));
}

//! Platform configuration families.
//!
//! `PlatformConfig` describes the firmware and CPU settings of a running
//! instance; `LaunchInstancePlatformConfig` is the subset accepted when an
//! instance is launched. Both dispatch on the `type` discriminator.

use coreapi_define::prelude::*;

/// Polymorphic base returned on `Instance.platformConfig`.
pub const PLATFORM_CONFIG: &str = "PlatformConfig";

/// Polymorphic base accepted on `LaunchInstanceDetails.platformConfig`.
pub const LAUNCH_PLATFORM_CONFIG: &str = "LaunchInstancePlatformConfig";

/// Discriminator enum of [`PLATFORM_CONFIG`].
pub const PLATFORM_CONFIG_TYPE: &str = "PlatformConfigType";

/// Discriminator enum of [`LAUNCH_PLATFORM_CONFIG`].
pub const LAUNCH_PLATFORM_CONFIG_TYPE: &str = "LaunchInstancePlatformConfigType";

/// NUMA nodes per socket on bare metal shapes.
pub const NUMA_NODES_PER_SOCKET: &str = "NumaNodesPerSocket";

/// Optional settings a platform variant carries beyond the shared boot flags.
#[derive(Clone, Copy)]
struct Extras {
    numa: bool,
    smt: bool,
    access_control: bool,
    virtual_instructions: bool,
    iommu: bool,
    cores: bool,
}

const NONE: Extras = Extras {
    numa: false,
    smt: false,
    access_control: false,
    virtual_instructions: false,
    iommu: false,
    cores: false,
};

const AMD_BM: Extras = Extras {
    numa: true,
    smt: true,
    access_control: true,
    virtual_instructions: true,
    iommu: true,
    cores: true,
};

const AMD_BM_GPU: Extras = Extras {
    cores: false,
    ..AMD_BM
};

const INTEL_BM: Extras = Extras {
    numa: true,
    smt: true,
    access_control: false,
    virtual_instructions: false,
    iommu: true,
    cores: true,
};

/// Platform variants: (tag, record suffix, extras, offered at launch).
const VARIANTS: &[(&str, &str, Extras, bool)] = &[
    ("AMD_MILAN_BM", "AmdMilanBm", AMD_BM, true),
    ("AMD_MILAN_BM_GPU", "AmdMilanBmGpu", AMD_BM_GPU, false),
    ("AMD_ROME_BM", "AmdRomeBm", AMD_BM, true),
    ("AMD_ROME_BM_GPU", "AmdRomeBmGpu", AMD_BM_GPU, false),
    ("AMD_VM", "AmdVm", NONE, true),
    ("GENERIC_BM", "GenericBm", AMD_BM, true),
    ("INTEL_ICELAKE_BM", "IntelIcelakeBm", INTEL_BM, true),
    ("INTEL_SKYLAKE_BM", "IntelSkylakeBm", NONE, true),
    ("INTEL_VM", "IntelVm", NONE, true),
];

fn shared_fields() -> [FieldDescriptor; 4] {
    [
        FieldDescriptor::body("isSecureBootEnabled", ValueKind::boolean()),
        FieldDescriptor::body("isTrustedPlatformModuleEnabled", ValueKind::boolean()),
        FieldDescriptor::body("isMeasuredBootEnabled", ValueKind::boolean()),
        FieldDescriptor::body("isMemoryEncryptionEnabled", ValueKind::boolean()),
    ]
}

fn extra_fields(extras: Extras) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    if extras.numa {
        fields.push(FieldDescriptor::body(
            "numaNodesPerSocket",
            ValueKind::enumeration(NUMA_NODES_PER_SOCKET),
        ));
    }
    if extras.smt {
        fields.push(FieldDescriptor::body("isSymmetricMultiThreadingEnabled", ValueKind::boolean()));
    }
    if extras.access_control {
        fields.push(FieldDescriptor::body("isAccessControlServiceEnabled", ValueKind::boolean()));
    }
    if extras.virtual_instructions {
        fields.push(FieldDescriptor::body("areVirtualInstructionsEnabled", ValueKind::boolean()));
    }
    if extras.iommu {
        fields.push(FieldDescriptor::body(
            "isInputOutputMemoryManagementUnitEnabled",
            ValueKind::boolean(),
        ));
    }
    if extras.cores {
        fields.push(FieldDescriptor::body("percentageOfCoresEnabled", ValueKind::int32()));
        fields.push(FieldDescriptor::body("configMap", ValueKind::string_map()));
    }
    fields
}

/// Record name of a running-instance platform variant, e.g. `AmdVmPlatformConfig`.
pub fn variant_record(suffix: &str) -> String {
    format!("{suffix}PlatformConfig")
}

/// Record name of a launch-time platform variant, e.g. `AmdVmLaunchInstancePlatformConfig`.
pub fn launch_variant_record(suffix: &str) -> String {
    format!("{suffix}LaunchInstancePlatformConfig")
}

/// Registers both platform families.
pub fn register(builder: &mut SchemaRegistryBuilder) {
    builder
        .enumeration(EnumDescriptor::new(
            PLATFORM_CONFIG_TYPE,
            VARIANTS.iter().map(|(tag, ..)| *tag),
        ))
        .enumeration(EnumDescriptor::new(
            LAUNCH_PLATFORM_CONFIG_TYPE,
            VARIANTS
                .iter()
                .filter(|(.., launch)| *launch)
                .map(|(tag, ..)| *tag),
        ))
        .enumeration(EnumDescriptor::new(
            NUMA_NODES_PER_SOCKET,
            ["NPS0", "NPS1", "NPS2", "NPS4"],
        ));

    let mut table = Polymorphism::new("type").discriminator_enum(PLATFORM_CONFIG_TYPE);
    let mut launch_table =
        Polymorphism::new("type").discriminator_enum(LAUNCH_PLATFORM_CONFIG_TYPE);

    for &(tag, suffix, extras, launch) in VARIANTS {
        let name = variant_record(suffix);
        builder.record(
            RecordDescriptor::new(&name)
                .variant_of(PLATFORM_CONFIG, "type", tag)
                .fields(shared_fields())
                .fields(extra_fields(extras)),
        );
        table = table.variant(tag, name);

        if launch {
            let name = launch_variant_record(suffix);
            builder.record(
                RecordDescriptor::new(&name)
                    .variant_of(LAUNCH_PLATFORM_CONFIG, "type", tag)
                    .fields(shared_fields())
                    .fields(extra_fields(extras)),
            );
            launch_table = launch_table.variant(tag, name);
        }
    }

    builder
        .record(
            RecordDescriptor::new(PLATFORM_CONFIG)
                .with_description("The platform configuration for the instance")
                .fields(shared_fields())
                .polymorphic(table),
        )
        .record(
            RecordDescriptor::new(LAUNCH_PLATFORM_CONFIG)
                .with_description("The platform configuration requested for the instance")
                .fields(shared_fields())
                .polymorphic(launch_table),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        let mut builder = SchemaRegistry::builder();
        register(&mut builder);
        builder.build().unwrap()
    }

    #[test]
    fn platform_table_is_total() {
        let registry = registry();
        let base = registry.lookup(PLATFORM_CONFIG).unwrap();
        let table = base.polymorphism.as_ref().unwrap();
        assert_eq!(table.variants.len(), 9);
        assert_eq!(
            table.variant_for("AMD_MILAN_BM_GPU"),
            Some("AmdMilanBmGpuPlatformConfig")
        );
    }

    #[test]
    fn launch_table_skips_gpu_shapes() {
        let registry = registry();
        let base = registry.lookup(LAUNCH_PLATFORM_CONFIG).unwrap();
        let table = base.polymorphism.as_ref().unwrap();
        assert_eq!(table.variants.len(), 7);
        assert!(table.variant_for("AMD_ROME_BM_GPU").is_none());
    }

    #[test]
    fn gpu_variant_fields() {
        let registry = registry();
        let gpu = registry.lookup("AmdMilanBmGpuPlatformConfig").unwrap();
        assert!(gpu.field_named("numaNodesPerSocket").is_some());
        assert!(gpu.field_named("isSecureBootEnabled").is_some());
        assert!(gpu.field_named("percentageOfCoresEnabled").is_none());
        assert_eq!(gpu.tag(), Some("AMD_MILAN_BM_GPU"));
    }

    #[test]
    fn vm_variant_has_only_shared_fields() {
        let registry = registry();
        assert_eq!(registry.lookup("IntelVmPlatformConfig").unwrap().fields.len(), 4);
    }
}

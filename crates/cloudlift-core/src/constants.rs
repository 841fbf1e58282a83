//! Names with fixed meaning in the migration API wire contract.
//!
//! These mirror what the scheduler expects: the OS buckets of the migration
//! image map, the schema field carrying it, and the wizard options that are
//! submitted as top-level request attributes rather than inside the
//! destination environment.

/// OS buckets a migration image map is keyed by.
pub const MIGRATION_IMAGE_OS_TYPES: &[&str] = &["windows", "linux"];

/// Schema field (and payload key) holding the per-OS image choices.
pub const MIGRATION_IMAGE_MAP_FIELD: &str = "migr_image_map";

/// Wizard options that become top-level request attributes.
pub const BASE_RESERVED_OPTIONS: &[&str] =
    &["execute_now", "separate_vm", "skip_os_morphing", "description"];

/// Migration form fields handled outside the destination environment.
pub const MIGRATION_FIELDS: &[&str] = &["skip_os_morphing"];

/// Replica execution options handled outside the destination environment.
pub const EXECUTION_OPTIONS: &[&str] = &["shutdown_instances"];

/// Whether an option name is reserved and must never appear in a destination
/// environment payload.
///
/// Covers the base reserved set, migration form fields, execution options
/// and the per-OS `{os}_os_image` selections (those travel in the migration
/// image map instead).
pub fn is_reserved_option(name: &str) -> bool {
    BASE_RESERVED_OPTIONS.contains(&name)
        || MIGRATION_FIELDS.contains(&name)
        || EXECUTION_OPTIONS.contains(&name)
        || name
            .strip_suffix("_os_image")
            .is_some_and(|os| MIGRATION_IMAGE_OS_TYPES.contains(&os))
}

//! Integration tests for catalog linting and persisted edge handle checks.

use pretty_assertions::assert_eq;

use topology_handles::handle::{handle_id_json_schema, validate_edge_handles, HANDLE_ID_PATTERN};
use topology_handles::lint::{self, LintCategory};
use topology_handles::{CatalogEntry, HandleCatalog};

#[test]
fn test_builtin_catalog_lints_clean() {
    assert_eq!(lint::check(&HandleCatalog::builtin()), vec![]);
}

#[test]
fn test_lint_reports_without_changing_lookup() {
    let crowded: Vec<String> = (1..=5).map(|i| format!("in-left-{}", i)).collect();
    let catalog = HandleCatalog::new()
        .with_entry("patchbay", CatalogEntry::new(crowded, ["out-right-1"]))
        .with_entry("probe", CatalogEntry::new(["in-top-1", "in-top-1", "top-1"], Vec::<String>::new()));

    let categories: Vec<_> = lint::check(&catalog).into_iter().map(|w| w.category).collect();
    assert_eq!(
        categories,
        vec![
            LintCategory::MissingDefault,
            LintCategory::SideCapacity,
            LintCategory::Duplicate,
            LintCategory::InvalidId,
        ]
    );

    // reported, not enforced
    assert_eq!(catalog.lookup("patchbay").inputs.len(), 5);
    assert_eq!(catalog.lookup("probe").inputs.len(), 1);
}

#[test]
fn test_lint_warning_display() {
    let catalog = HandleCatalog::new()
        .with_entry("default", CatalogEntry::new(["in-left-1"], ["out-right-1"]))
        .with_entry("probe", CatalogEntry::new(["in-left-01"], Vec::<String>::new()));
    let warnings = lint::check(&catalog);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].to_string(),
        "[invalid-id] probe: 'in-left-01' in 'in' is not a handle id and is ignored"
    );
}

#[test]
fn test_persisted_edge_handles() {
    assert!(validate_edge_handles(Some("out-bottom-1"), Some("in-top-4")).is_ok());
    assert!(validate_edge_handles(None, Some("in-top-4")).is_ok());

    let err = validate_edge_handles(Some("out-middle-1"), None).unwrap_err();
    assert_eq!(err.field, "sourceHandle");
    assert!(err.to_string().starts_with("invalid sourceHandle 'out-middle-1': "));
}

#[test]
fn test_schema_fragment_uses_shared_pattern() {
    let schema = handle_id_json_schema();
    assert_eq!(schema["pattern"].as_str(), Some(HANDLE_ID_PATTERN));
}

//! Tests for context aggregation.

use super::*;
use std::fs;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn specs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

#[test]
fn test_single_file_keyed_by_spec() {
    let root = TempDir::new().unwrap();
    write(root.path(), "specs/api_standards.md", "# API Standards\n\nTest content");

    let resolved = resolve_context(root.path(), &specs(&["/specs/api_standards.md"]), None).unwrap();

    assert_eq!(resolved.len(), 1);
    assert!(
        resolved
            .get("/specs/api_standards.md")
            .unwrap()
            .contains("API Standards")
    );
}

#[test]
fn test_relative_spec_keeps_its_form() {
    let root = TempDir::new().unwrap();
    write(root.path(), "specs/a.md", "a");

    let resolved = resolve_context(root.path(), &specs(&["specs/a.md"]), None).unwrap();

    assert!(resolved.contains_key("specs/a.md"));
}

#[test]
fn test_directory_yields_one_entry_per_file() {
    let root = TempDir::new().unwrap();
    write(root.path(), "standards/naming.md", "naming");
    write(root.path(), "standards/errors.md", "errors");

    let resolved = resolve_context(root.path(), &specs(&["/standards"]), None).unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved.get("standards/errors.md"), Some("errors"));
    assert_eq!(resolved.get("standards/naming.md"), Some("naming"));
}

#[test]
fn test_directory_is_walked_recursively_in_name_order() {
    let root = TempDir::new().unwrap();
    write(root.path(), "docs/b.md", "b");
    write(root.path(), "docs/a/nested.md", "nested");
    write(root.path(), "docs/c.md", "c");

    let resolved = resolve_context(root.path(), &specs(&["docs"]), None).unwrap();

    let keys: Vec<&str> = resolved.keys().collect();
    assert_eq!(keys, vec!["docs/a/nested.md", "docs/b.md", "docs/c.md"]);
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_in_directory_is_skipped() {
    let root = TempDir::new().unwrap();
    write(root.path(), "d/a.md", "a");
    std::os::unix::fs::symlink(root.path().join("d"), root.path().join("d/loop")).unwrap();

    let resolved = resolve_context(root.path(), &specs(&["d"]), None).unwrap();

    let keys: Vec<&str> = resolved.keys().collect();
    assert_eq!(keys, vec!["d/a.md"]);
}

#[test]
fn test_variables_substituted_into_key() {
    let root = TempDir::new().unwrap();
    write(root.path(), "docs/api.md", "api docs");
    let vars: VariableBinding = [("SERVICE", "api")].into_iter().collect();

    let resolved = resolve_context(root.path(), &specs(&["/docs/{SERVICE}.md"]), Some(&vars)).unwrap();

    assert_eq!(resolved.get("/docs/api.md"), Some("api docs"));
}

#[test]
fn test_unbound_placeholder_is_reported_missing() {
    let root = TempDir::new().unwrap();

    let err = resolve_context(root.path(), &specs(&["/docs/{SERVICE}.md"]), None).unwrap_err();

    assert!(err.to_string().contains("/docs/{SERVICE}.md"));
}

#[test]
fn test_all_missing_specs_are_reported() {
    let root = TempDir::new().unwrap();
    write(root.path(), "present.md", "here");

    let err = resolve_context(
        root.path(),
        &specs(&["/missing-one.md", "present.md", "/missing-two"]),
        None,
    )
    .unwrap_err();

    match &err {
        RunbookError::MissingContext(missing) => {
            assert_eq!(missing.len(), 2);
            assert_eq!(missing[0].spec, "/missing-one.md");
            assert_eq!(missing[0].resolved, root.path().join("missing-one.md"));
            assert_eq!(missing[1].spec, "/missing-two");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("/missing-one.md"));
    assert!(message.contains("/missing-two"));
    assert!(message.contains(&root.path().join("missing-two").display().to_string()));
}

#[test]
fn test_repo_keys_are_prefixed() {
    let root = TempDir::new().unwrap();
    write(root.path(), "src/lib.rs", "pub fn f() {}");
    write(root.path(), "src/routes/users.rs", "users");

    let resolved = resolve_repo(root.path(), &specs(&["src/lib.rs", "src/routes"]), None).unwrap();

    assert_eq!(resolved.get("repo:src/lib.rs"), Some("pub fn f() {}"));
    assert_eq!(resolved.get("repo:src/routes/users.rs"), Some("users"));
}

#[test]
fn test_repo_missing_uses_repo_error() {
    let root = TempDir::new().unwrap();

    let err = resolve_repo(root.path(), &specs(&["nope.rs"]), None).unwrap_err();

    assert!(matches!(err, RunbookError::MissingRepoFiles(ref m) if m.len() == 1));
    assert!(err.to_string().starts_with("repo paths not found"));
}

#[test]
fn test_repo_and_context_keys_do_not_collide() {
    let context = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();
    write(context.path(), "README.md", "context readme");
    write(repo.path(), "README.md", "repo readme");

    let mut resolved = resolve_context(context.path(), &specs(&["README.md"]), None).unwrap();
    resolved.extend(resolve_repo(repo.path(), &specs(&["README.md"]), None).unwrap());

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved.get("README.md"), Some("context readme"));
    assert_eq!(resolved.get("repo:README.md"), Some("repo readme"));
}

#[test]
fn test_empty_spec_list_resolves_to_nothing() {
    let root = TempDir::new().unwrap();
    let resolved = resolve_context(root.path(), &[], None).unwrap();
    assert!(resolved.is_empty());
}

#[test]
fn test_aggregate_absent_declaration() {
    let root = TempDir::new().unwrap();
    let resolved = aggregate(Source::Context, root.path(), None, None).unwrap();
    assert!(resolved.is_empty());
}

#[test]
fn test_aggregate_null_and_wrong_type_are_distinct() {
    let root = TempDir::new().unwrap();

    let null_err = aggregate(Source::Context, root.path(), Some(&Value::Null), None).unwrap_err();
    let string_err = aggregate(
        Source::Context,
        root.path(),
        Some(&yaml("specs/api.md")),
        None,
    )
    .unwrap_err();

    let (null_reason, string_reason) = match (&null_err, &string_err) {
        (
            RunbookError::InvalidSpecType { reason: a, field: fa },
            RunbookError::InvalidSpecType { reason: b, field: fb },
        ) => {
            assert_eq!(fa, "context");
            assert_eq!(fb, "context");
            (a.clone(), b.clone())
        }
        other => panic!("unexpected errors: {:?}", other),
    };
    assert_ne!(null_reason, string_reason);
    assert!(null_reason.contains("has no value"));
    assert!(string_reason.contains("found a string"));
}

#[test]
fn test_aggregate_rejects_non_string_entries() {
    let root = TempDir::new().unwrap();

    let err = aggregate(Source::Repo, root.path(), Some(&yaml("[a.md, 3, {k: v}]")), None)
        .unwrap_err();

    match err {
        RunbookError::InvalidSpecType { field, reason } => {
            assert_eq!(field, "repo");
            assert!(reason.contains("entry 1 is a number"));
            assert!(reason.contains("entry 2 is a mapping"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_aggregate_sequence_resolves() {
    let root = TempDir::new().unwrap();
    write(root.path(), "a.md", "a");

    let resolved = aggregate(Source::Repo, root.path(), Some(&yaml("[a.md]")), None).unwrap();

    assert_eq!(resolved.get("repo:a.md"), Some("a"));
}

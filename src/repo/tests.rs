//! Tests for repository reading.

use super::*;
use std::fs;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_read_file() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "test.txt", "Hello, World!");

    assert_eq!(read_file(repo.path(), "test.txt").unwrap(), "Hello, World!");
}

#[test]
fn test_read_file_with_leading_slash() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "subdir/nested.txt", "Nested content");

    assert_eq!(
        read_file(repo.path(), "/subdir/nested.txt").unwrap(),
        "Nested content"
    );
}

#[test]
fn test_read_file_not_found() {
    let repo = TempDir::new().unwrap();
    let err = read_file(repo.path(), "nonexistent.txt").unwrap_err();
    assert!(matches!(err, RunbookError::Io { .. }));
}

#[test]
fn test_list_files() {
    let repo = TempDir::new().unwrap();
    for name in ["file2.txt", "file1.txt", "file3.py"] {
        write(repo.path(), name, "content");
    }

    assert_eq!(
        list_files(repo.path(), "", None),
        vec!["file1.txt", "file2.txt", "file3.py"]
    );
}

#[test]
fn test_list_files_with_pattern() {
    let repo = TempDir::new().unwrap();
    for name in ["file1.txt", "file2.txt", "file3.py"] {
        write(repo.path(), name, "content");
    }

    assert_eq!(
        list_files(repo.path(), "", Some(".txt")),
        vec!["file1.txt", "file2.txt"]
    );
}

#[test]
fn test_list_files_in_directory() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "root.txt", "root");
    write(repo.path(), "subdir/sub.txt", "sub");

    assert_eq!(list_files(repo.path(), "subdir", None), vec!["subdir/sub.txt"]);
}

#[test]
fn test_list_files_nonexistent_directory() {
    let repo = TempDir::new().unwrap();
    assert!(list_files(repo.path(), "nonexistent", None).is_empty());
}

#[test]
fn test_structure_lists_files_with_sizes() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "file1.txt", "content1");
    write(repo.path(), "subdir/file2.txt", "content22");

    let tree = structure(repo.path(), 3);

    assert_eq!(tree.get("file1.txt"), Some(&Some(StructureNode::File(8))));
    let Some(Some(StructureNode::Directory(subdir))) = tree.get("subdir") else {
        panic!("subdir should be a directory: {:?}", tree);
    };
    assert_eq!(subdir.get("file2.txt"), Some(&Some(StructureNode::File(9))));
}

#[test]
fn test_structure_respects_max_depth() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "level1/level2/level3/deep.txt", "deep");

    let tree = structure(repo.path(), 1);

    let Some(Some(StructureNode::Directory(level1))) = tree.get("level1") else {
        panic!("level1 should be a directory: {:?}", tree);
    };
    assert_eq!(level1.get("level2"), Some(&None));
}

#[test]
fn test_structure_hides_dotfiles() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), ".hidden", "hidden");
    write(repo.path(), ".git/config", "x");
    write(repo.path(), "visible.txt", "visible");

    let tree = structure(repo.path(), 2);

    assert!(tree.contains_key("visible.txt"));
    assert!(!tree.contains_key(".hidden"));
    assert!(!tree.contains_key(".git"));
}

#[test]
fn test_structure_empty_directory_is_null() {
    let repo = TempDir::new().unwrap();
    fs::create_dir(repo.path().join("empty")).unwrap();
    write(repo.path(), "a.txt", "a");

    let tree = structure(repo.path(), 2);

    assert_eq!(tree.get("empty"), Some(&None));
}

#[test]
fn test_structure_of_empty_repo_is_empty() {
    let repo = TempDir::new().unwrap();
    assert!(structure(repo.path(), 2).is_empty());
}

#[test]
fn test_structure_serializes_as_nested_json() {
    let repo = TempDir::new().unwrap();
    write(repo.path(), "a.txt", "abc");
    write(repo.path(), "src/main.rs", "fn main() {}");
    fs::create_dir(repo.path().join("empty")).unwrap();

    let json = serde_json::to_value(structure(repo.path(), 2)).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "a.txt": 3,
            "empty": null,
            "src": { "main.rs": 12 }
        })
    );
}

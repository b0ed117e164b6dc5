use super::*;
use crate::foundation::error::ErrorKind;

#[test]
fn nested_scope_paths_join_ancestors() {
    let b = FolderScope::root().child("b").unwrap();
    let a = b.child("a").unwrap();
    assert_eq!(b.path().as_deref(), Some("b"));
    assert_eq!(a.folder_name(), Some("a"));
    assert_eq!(a.parent_path(), Some("b"));
    assert_eq!(a.path().as_deref(), Some("b/a"));

    let c = a.child("c").unwrap();
    assert_eq!(c.parent_path(), Some("b/a"));
    assert_eq!(c.path().as_deref(), Some("b/a/c"));
}

#[test]
fn root_scope_has_no_path() {
    assert_eq!(FolderScope::root().path(), None);
    assert_eq!(FolderScope::root().parent_path(), None);
}

#[test]
fn child_rejects_invalid_names() {
    let err = FolderScope::root().child("a/b").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFolderName);
    let err = FolderScope::root().child("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFolderName);
}

#[test]
fn enter_returns_full_path_and_exit_removes() {
    let mut ns = FolderNamespace::new();
    assert_eq!(ns.enter_folder("b", None).unwrap(), "b");
    assert_eq!(ns.enter_folder("a", Some("b")).unwrap(), "b/a");
    assert!(ns.contains_path("b/a"));
    assert_eq!(ns.folders().len(), 2);

    ns.exit_folder("a", Some("b"));
    assert!(!ns.contains_path("b/a"));
    assert_eq!(ns.folders().len(), 1);
}

#[test]
fn sibling_with_same_name_shares_one_node() {
    let mut ns = FolderNamespace::new();
    ns.enter_folder("scenes", None).unwrap();
    ns.enter_folder("scenes", None).unwrap();
    assert_eq!(ns.folders().len(), 1);

    ns.exit_folder("scenes", None);
    assert!(ns.contains_path("scenes"));
    ns.exit_folder("scenes", None);
    assert!(ns.folders().is_empty());
}

#[test]
fn same_name_under_different_parents_is_distinct() {
    let mut ns = FolderNamespace::new();
    ns.enter_folder("x", None).unwrap();
    ns.enter_folder("x", Some("y")).unwrap();
    assert_eq!(ns.folders().len(), 2);
}

#[test]
fn exit_unknown_folder_is_noop() {
    let mut ns = FolderNamespace::new();
    ns.exit_folder("ghost", None);
    ns.enter_folder("a", None).unwrap();
    ns.exit_folder("a", Some("elsewhere"));
    assert_eq!(ns.folders().len(), 1);
}

#[test]
fn enter_rejects_invalid_name_without_mutation() {
    let mut ns = FolderNamespace::new();
    assert!(ns.enter_folder("", None).is_err());
    assert!(ns.folders().is_empty());
}

use super::*;
use crate::foundation::error::ErrorKind;

const MANIFEST: &str = r#"
{
  "root": [
    { "folder": { "name": "b", "children": [
      { "folder": { "name": "a", "children": [
        { "composition": { "id": "intro", "width": 1920, "height": 1080,
                           "fps": 30, "durationInFrames": 90, "view": "Intro",
                           "lazy": true, "defaultProps": { "title": "Hello" } } }
      ] } }
    ] } },
    { "still": { "id": "thumb", "width": 1280, "height": 720, "view": "Intro" } }
  ]
}
"#;

#[test]
fn parses_nested_tree() {
    let m = Manifest::from_reader(MANIFEST.as_bytes()).unwrap();
    assert_eq!(m.root.len(), 2);
    let mut catalog = ViewCatalog::new();
    let decls = m.to_declarations(&mut catalog).unwrap();

    match &decls[0] {
        Declaration::Folder { name, children } => {
            assert_eq!(name, "b");
            assert!(matches!(&children[0], Declaration::Folder { name, .. } if name == "a"));
        }
        other => panic!("expected folder, got {other:?}"),
    }
    match &decls[1] {
        Declaration::Composition(c) => {
            assert_eq!(c.id, "thumb");
            assert_eq!(c.fps, 1.0);
            assert_eq!(c.duration_in_frames, 1.0);
        }
        other => panic!("expected still, got {other:?}"),
    }
    assert_eq!(catalog.lazy_count(), 1);
}

#[test]
fn catalog_returns_stable_identity() {
    let mut catalog = ViewCatalog::new();
    let a = catalog.source("Intro", false);
    let b = catalog.source("Intro", false);
    assert!(a.same_identity(&b));

    let l1 = catalog.source("Intro", true);
    let l2 = catalog.source("Intro", true);
    assert!(l1.same_identity(&l2));
    assert!(!l1.same_identity(&a));
}

#[test]
fn resolve_all_completes_lazy_views() {
    let mut catalog = ViewCatalog::new();
    let src = catalog.source("Outro", true);
    assert!(matches!(src.poll(), crate::composition::record::ViewPoll::Pending));
    catalog.resolve_all();
    assert!(matches!(src.poll(), crate::composition::record::ViewPoll::Ready(_)));
}

#[test]
fn rejects_unknown_fields_and_bad_props() {
    let bad = r#"{ "root": [ { "folder": { "name": "x", "colour": "red" } } ] }"#;
    assert_eq!(
        Manifest::from_reader(bad.as_bytes()).unwrap_err().kind(),
        ErrorKind::Serde
    );

    let bad_props = r#"{ "root": [ { "still": { "id": "s", "width": 1, "height": 1,
        "view": "V", "defaultProps": [1] } } ] }"#;
    let m = Manifest::from_reader(bad_props.as_bytes()).unwrap();
    let err = m.to_declarations(&mut ViewCatalog::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serde);
}

#[test]
fn missing_file_is_reported() {
    let err = Manifest::from_path("target/does-not-exist/manifest.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}

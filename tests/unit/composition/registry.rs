use super::*;
use crate::{
    composition::record::{NamedView, ViewSource},
    foundation::{core::Props, error::ErrorKind},
};

fn record(id: &str) -> CompositionRecord {
    CompositionRecord {
        id: id.to_string(),
        width: 1920.0,
        height: 1080.0,
        fps: 30.0,
        duration_in_frames: 150.0,
        folder_path: None,
        component: ViewSource::from(NamedView::shared(id)),
        default_props: Props::new(),
        nonce: 0,
    }
}

#[test]
fn register_then_unregister_leaves_registry_empty() {
    let mut reg = CompositionRegistry::new();
    reg.register(record("intro")).unwrap();
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get("intro").unwrap().width, 1920.0);

    reg.unregister("intro");
    assert!(reg.is_empty());
    assert!(reg.get("intro").is_none());
}

#[test]
fn duplicate_id_fails_and_keeps_first() {
    let mut reg = CompositionRegistry::new();
    reg.register(record("intro")).unwrap();

    let mut second = record("intro");
    second.width = 640.0;
    let err = reg.register(second).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateId);

    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get("intro").unwrap().width, 1920.0);
}

#[test]
fn zero_width_and_zero_height_fail_without_mutation() {
    let mut reg = CompositionRegistry::new();
    reg.register(record("kept")).unwrap();

    let mut w = record("wide");
    w.width = 0.0;
    assert_eq!(reg.register(w).unwrap_err().kind(), ErrorKind::InvalidDimension);

    let mut h = record("tall");
    h.height = 0.0;
    assert_eq!(reg.register(h).unwrap_err().kind(), ErrorKind::InvalidDimension);

    assert_eq!(reg.len(), 1);
    assert!(reg.get("wide").is_none());
    assert!(reg.get("tall").is_none());
}

#[test]
fn missing_id_is_checked_first() {
    let mut reg = CompositionRegistry::new();
    let mut r = record("x");
    r.id = String::new();
    r.width = -1.0;
    assert_eq!(reg.register(r).unwrap_err().kind(), ErrorKind::MissingId);
}

#[test]
fn validation_order_is_id_width_height_duration_fps() {
    let mut reg = CompositionRegistry::new();

    let mut r = record("bad id");
    r.width = 0.0;
    assert_eq!(reg.register(r).unwrap_err().kind(), ErrorKind::InvalidId);

    let mut r = record("a");
    r.width = 0.0;
    r.height = 0.0;
    let err = reg.register(r).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDimension);
    assert!(err.to_string().contains("\"width\""));

    let mut r = record("a");
    r.height = f64::NAN;
    r.duration_in_frames = 0.0;
    let err = reg.register(r).unwrap_err();
    assert!(err.to_string().contains("\"height\""));

    let mut r = record("a");
    r.duration_in_frames = 0.5;
    r.fps = 0.0;
    assert_eq!(reg.register(r).unwrap_err().kind(), ErrorKind::InvalidDuration);

    let mut r = record("a");
    r.fps = -30.0;
    assert_eq!(reg.register(r).unwrap_err().kind(), ErrorKind::InvalidFps);

    assert!(reg.is_empty());
}

#[test]
fn validation_runs_before_duplicate_check() {
    let mut reg = CompositionRegistry::new();
    reg.register(record("intro")).unwrap();
    let mut r = record("intro");
    r.fps = 0.0;
    assert_eq!(reg.register(r).unwrap_err().kind(), ErrorKind::InvalidFps);
}

#[test]
fn unregister_absent_id_is_noop() {
    let mut reg = CompositionRegistry::new();
    reg.register(record("a")).unwrap();
    reg.unregister("b");
    reg.unregister("b");
    assert_eq!(reg.len(), 1);
}

#[test]
fn list_preserves_registration_order() {
    let mut reg = CompositionRegistry::new();
    for id in ["c", "a", "b"] {
        reg.register(record(id)).unwrap();
    }
    let ids: Vec<&str> = reg.list().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn folders_are_tracked_alongside_compositions() {
    let mut reg = CompositionRegistry::new();
    let path = reg.enter_folder("b", None).unwrap();
    reg.enter_folder("a", Some(&path)).unwrap();
    assert_eq!(reg.folders().len(), 2);
    reg.exit_folder("a", Some("b"));
    reg.exit_folder("b", None);
    assert!(reg.folders().is_empty());
}

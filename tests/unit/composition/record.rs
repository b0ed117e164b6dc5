use super::*;

fn record(component: ViewSource) -> CompositionRecord {
    CompositionRecord {
        id: "intro".to_string(),
        width: 1920.0,
        height: 1080.0,
        fps: 30.0,
        duration_in_frames: 90.0,
        folder_path: None,
        component,
        default_props: Props::new(),
        nonce: 0,
    }
}

#[test]
fn lazy_view_moves_from_pending_to_ready() {
    let (lazy, loader) = LazyView::new("Intro");
    assert!(matches!(lazy.poll(), ViewPoll::Pending));
    loader.resolve(NamedView::shared("Intro"));
    match lazy.poll() {
        ViewPoll::Ready(v) => assert_eq!(v.name(), "Intro"),
        other => panic!("expected ready, got {other:?}"),
    }
}

#[test]
fn lazy_view_failure_is_visible_to_clones() {
    let (lazy, loader) = LazyView::new("Broken");
    let clone = lazy.clone();
    loader.fail("chunk missing");
    assert!(matches!(clone.poll(), ViewPoll::Failed(msg) if msg == "chunk missing"));
}

#[test]
fn identity_is_pointer_identity() {
    let a = NamedView::shared("A");
    let a2 = NamedView::shared("A");
    let src = ViewSource::from(Rc::clone(&a));
    assert!(src.same_identity(&ViewSource::from(a)));
    assert!(!src.same_identity(&ViewSource::from(a2)));

    let (lazy, _loader) = LazyView::new("A");
    let lazy_src = ViewSource::from(lazy.clone());
    assert!(lazy_src.same_identity(&ViewSource::from(lazy)));
    assert!(!lazy_src.same_identity(&src));
}

#[test]
fn same_inputs_detects_field_changes() {
    let view = NamedView::shared("Intro");
    let a = record(ViewSource::from(Rc::clone(&view)));
    let mut b = a.clone();
    assert!(a.same_inputs(&b));

    b.width = 1280.0;
    assert!(!a.same_inputs(&b));

    let mut c = a.clone();
    c.nonce = 1;
    assert!(!a.same_inputs(&c));

    let mut d = a.clone();
    d.default_props
        .insert("title".to_string(), serde_json::json!("x"));
    assert!(!a.same_inputs(&d));
}

#[test]
fn summary_reports_size_and_duration() {
    let r = record(ViewSource::from(NamedView::shared("Intro")));
    assert_eq!(r.size(), Size::new(1920.0, 1080.0));
    assert_eq!(r.duration_frames(), 90);
    assert!((r.duration_secs() - 3.0).abs() < 1e-9);

    let s = r.summary();
    assert_eq!(s.view, "Intro");
    assert!(!s.lazy);
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["durationInFrames"], serde_json::json!(90));
    assert_eq!(json["folderPath"], serde_json::Value::Null);
}

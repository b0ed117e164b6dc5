use super::*;

#[test]
fn parse_accepts_names_and_aliases() {
    assert_eq!("interactive".parse::<OperatingMode>().unwrap(), OperatingMode::Interactive);
    assert_eq!("preview".parse::<OperatingMode>().unwrap(), OperatingMode::Interactive);
    assert_eq!(
        "headless-render".parse::<OperatingMode>().unwrap(),
        OperatingMode::HeadlessRender
    );
    assert_eq!("rendering".parse::<OperatingMode>().unwrap(), OperatingMode::HeadlessRender);
    assert_eq!("other".parse::<OperatingMode>().unwrap(), OperatingMode::Other);
    assert!("bogus".parse::<OperatingMode>().is_err());
}

#[test]
fn env_value_is_lenient() {
    assert_eq!(OperatingMode::from_env_value("bogus"), OperatingMode::Other);
    assert_eq!(OperatingMode::from_env_value("rendering"), OperatingMode::HeadlessRender);
}

#[test]
fn display_and_serde_use_kebab_case() {
    assert_eq!(OperatingMode::HeadlessRender.to_string(), "headless-render");
    assert_eq!(
        serde_json::to_string(&OperatingMode::HeadlessRender).unwrap(),
        "\"headless-render\""
    );
    let m: OperatingMode = serde_json::from_str("\"interactive\"").unwrap();
    assert_eq!(m, OperatingMode::Interactive);
}

#[test]
fn host_environment_reflects_updates() {
    let env = HostEnvironment::new(OperatingMode::Interactive, Some("a".to_string()), Props::new());
    assert_eq!(env.selected_composition().as_deref(), Some("a"));

    env.select(Some("b"));
    env.set_mode(OperatingMode::HeadlessRender);
    let mut props = Props::new();
    props.insert("k".to_string(), serde_json::json!(1));
    env.set_input_props(props);

    assert_eq!(env.selected_composition().as_deref(), Some("b"));
    assert_eq!(env.mode(), OperatingMode::HeadlessRender);
    assert_eq!(env.input_props()["k"], serde_json::json!(1));

    env.select(None);
    assert_eq!(env.selected_composition(), None);
}

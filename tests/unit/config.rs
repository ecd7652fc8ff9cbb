use super::*;
use crate::session::line::FreezePolicy;
use crate::session::rotation::RotationMode;

#[test]
fn empty_object_yields_defaults() {
    let cfg = EngineConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, EngineConfig::default());
    cfg.validate().unwrap();
}

#[test]
fn nested_sections_override_individually() {
    let json = r#"{
        "font_dirs": ["/opt/fonts"],
        "session": {
            "lines": 3,
            "freeze_policy": "toggle",
            "rotation": "sentence",
            "clarity": { "max": 8.0, "start": 5.0 },
            "seed": 42
        },
        "validator": { "min_ink_fraction": 0.2 }
    }"#;
    let cfg = EngineConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.font_dirs, vec![PathBuf::from("/opt/fonts")]);
    assert_eq!(cfg.session.lines, 3);
    assert_eq!(cfg.session.freeze_policy, FreezePolicy::Toggle);
    assert_eq!(cfg.session.rotation, RotationMode::Sentence);
    assert_eq!(cfg.session.clarity.max, 8.0);
    assert_eq!(cfg.session.clarity.start_value(), 5.0);
    assert_eq!(cfg.session.clarity.manual_step, 0.1);
    assert_eq!(cfg.session.seed, Some(42));
    assert_eq!(cfg.validator.min_ink_fraction, 0.2);
    assert_eq!(cfg.validator.probe_size_px, 30);
    cfg.validate().unwrap();
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EngineConfig::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, LegibilityError::Serde(_)));
}

#[test]
fn validate_catches_bad_sections() {
    let mut cfg = EngineConfig::default();
    cfg.session.clarity.start = Some(9.0);
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.session.scheduler.decay_interval_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.font_dirs.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn missing_file_reports_path() {
    let err = EngineConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

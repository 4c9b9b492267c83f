use super::*;

#[test]
fn empty_document_yields_defaults() {
    let cfg = BackdropConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, BackdropConfig::default());
    assert_eq!(cfg.smoothing, 0.09);
    assert_eq!(cfg.noise.size, 128);
    assert_eq!(cfg.grain.scale, 6.0);
    assert_eq!(cfg.particle_count, 0);
}

#[test]
fn nested_fields_override_individually() {
    let cfg = BackdropConfig::from_json_str(
        r#"{ "particle_count": 40, "seed": 7, "noise": { "binarize": true, "block_size": 2 },
             "grain": { "drift": [0.0, 0.0] } }"#,
    )
    .unwrap();
    assert_eq!(cfg.particle_count, 40);
    assert_eq!(cfg.seed, Some(7));
    assert!(cfg.noise.binarize);
    assert_eq!(cfg.noise.block_size, 2);
    assert_eq!(cfg.noise.size, 128);
    assert_eq!(cfg.grain.drift, [0.0, 0.0]);
    assert_eq!(cfg.grain.alpha, 0.22);
}

#[test]
fn unknown_keys_are_serde_errors() {
    let err = BackdropConfig::from_json_str(r#"{ "smothing": 0.2 }"#).unwrap_err();
    assert!(matches!(err, GlowfieldError::Serde(_)));
    let err = BackdropConfig::from_json_str(r#"{ "grain": { "speed": 1 } }"#).unwrap_err();
    assert!(matches!(err, GlowfieldError::Serde(_)));
}

#[test]
fn out_of_range_values_fail_validation() {
    for doc in [
        r#"{ "smoothing": 1.5 }"#,
        r#"{ "noise": { "size": 0 } }"#,
        r#"{ "noise": { "contrast": -1.0 } }"#,
        r#"{ "grain": { "scale": 0.0 } }"#,
        r#"{ "grain": { "alpha": 2.0 } }"#,
    ] {
        let err = BackdropConfig::from_json_str(doc).unwrap_err();
        assert!(matches!(err, GlowfieldError::Validation(_)), "{doc}");
    }
}

#[test]
fn pretty_json_parses_back() {
    let cfg = BackdropConfig {
        seed: Some(3),
        ..BackdropConfig::default()
    };
    let s = cfg.to_json_pretty().unwrap();
    assert_eq!(BackdropConfig::from_json_str(&s).unwrap(), cfg);
}

#[test]
fn missing_file_is_reported() {
    let err = BackdropConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}

use ftpgraph_core::{load_config, save_config, EstimatorConfig, FtpError};
use std::fs;

#[test]
fn test_save_and_load_config() {
    let path = "tests/tmp_config.json";

    // lag en justert konfig
    let mut cfg = EstimatorConfig::default();
    cfg.lookback_days = 90;
    cfg.activity_types = vec!["gravel_cycling".to_string()];
    cfg.policy.clamp_ratio = 1.05;
    cfg.resample_to_1hz = false;

    // lagre til disk
    save_config(&cfg, path).expect("kunne ikke lagre konfig");

    // les tilbake
    let loaded = load_config(path).expect("kunne ikke laste konfig");
    assert_eq!(loaded, cfg);

    // rydde opp
    fs::remove_file(path).ok();
}

#[test]
fn missing_file_gives_defaults() {
    let cfg = load_config("tests/does_not_exist.json").unwrap();
    assert_eq!(cfg, EstimatorConfig::default());
    assert_eq!(cfg.lookback_days, 60);
    assert_eq!(cfg.mmp_durations_s, vec![180, 300, 600, 1200, 1800, 2400, 3600]);
    assert_eq!(cfg.steady_windows_s, vec![2400, 3600]);
    assert_eq!(cfg.max_hold_secs, 10);
    assert!(cfg.activity_types.iter().any(|t| t == "road_biking"));
}

#[test]
fn partial_file_fills_in_defaults() {
    let path = "tests/tmp_partial_config.json";
    fs::write(path, r#"{"lookback_days": 30, "policy": {"model_weight": 0.6}}"#).unwrap();

    let cfg = load_config(path).unwrap();
    fs::remove_file(path).ok();

    assert_eq!(cfg.lookback_days, 30);
    assert_eq!(cfg.policy.model_weight, 0.6);
    // resten fra default
    assert_eq!(cfg.policy.clamp_ratio, 1.10);
    assert_eq!(cfg.policy.max_steady_vi, 1.05);
    assert_eq!(cfg.min_decoupling_samples, 3600);
    assert!(cfg.resample_to_1hz);
}

#[test]
fn invalid_json_is_a_config_error() {
    let path = "tests/tmp_broken_config.json";
    fs::write(path, "{ lookback_days: ").unwrap();

    let err = load_config(path).unwrap_err();
    fs::remove_file(path).ok();

    match err {
        FtpError::Config { path: p, .. } => assert_eq!(p, path),
        other => panic!("forventet Config-feil, fikk {other:?}"),
    }
}

use super::*;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

fn temp_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("uci_engine_{}_{name}.toml", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_default_config() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.depth, 3);
    assert_eq!(cfg.log_filter, "info");
    assert!(cfg.pruning);
}

#[test]
fn test_clamp_depth() {
    assert_eq!(clamp_depth(0), 1);
    assert_eq!(clamp_depth(4), 4);
    assert_eq!(clamp_depth(99), 4);
}

#[test]
fn test_toml_partial_fills_defaults() {
    let cfg = EngineConfig::from_toml_str("depth = 2").unwrap();
    assert_eq!(cfg.depth, 2);
    assert_eq!(cfg.log_filter, "info");

    let cfg = EngineConfig::from_toml_str("depth = 200\npruning = false\nlog_filter = \"debug\"")
        .unwrap();
    assert_eq!(cfg.depth, MAX_DEPTH);
    assert!(!cfg.pruning);
    assert_eq!(cfg.log_filter, "debug");
}

#[test]
fn test_toml_rejects_unknown_keys() {
    assert!(EngineConfig::from_toml_str("hash = 16").is_err());
    assert!(EngineConfig::from_toml_str("depth = \"deep\"").is_err());
}

#[test]
fn test_load_without_sources_is_default() {
    let cfg = EngineConfig::load_with(None, None, env(&[])).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn test_env_then_flag_precedence() {
    let cfg = EngineConfig::load_with(None, None, env(&[(DEPTH_VAR, "2")])).unwrap();
    assert_eq!(cfg.depth, 2);

    let cfg = EngineConfig::load_with(None, Some(4), env(&[(DEPTH_VAR, "2")])).unwrap();
    assert_eq!(cfg.depth, 4);

    let err = EngineConfig::load_with(None, None, env(&[(DEPTH_VAR, "two")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_file_from_flag_and_env_var() {
    let path = temp_config("layers", "depth = 4\npruning = false\n");

    let cfg = EngineConfig::load_with(Some(path.as_path()), None, env(&[])).unwrap();
    assert_eq!(cfg.depth, 4);
    assert!(!cfg.pruning);

    let path_str = path.to_string_lossy().to_string();
    let cfg = EngineConfig::load_with(
        None,
        None,
        env(&[(CONFIG_PATH_VAR, path_str.as_str()), (DEPTH_VAR, "1")]),
    )
    .unwrap();
    assert_eq!(cfg.depth, 1);
    assert!(!cfg.pruning);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_missing_and_broken_files() {
    let missing = std::env::temp_dir().join("uci_engine_definitely_missing.toml");
    let err = EngineConfig::load_with(Some(missing.as_path()), None, env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));

    let broken = temp_config("broken", "depth = [");
    let err = EngineConfig::load_with(Some(broken.as_path()), None, env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("invalid config file"));
    std::fs::remove_file(&broken).ok();
}

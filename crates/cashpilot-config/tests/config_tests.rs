use cashpilot_config::{AppConfig, ConfigError, ConfigManager, Purpose};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = AppConfig::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.budget_critical_pct, 0.2);
}

#[test]
fn config_manager_returns_defaults_when_file_missing() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, AppConfig::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = AppConfig::default();
    cfg.currency = "EUR".to_string();
    cfg.purpose = Purpose::Freelancer;
    cfg.liquidity_threshold = 500.0;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.purpose, Purpose::Freelancer);
    assert_eq!(loaded.liquidity_threshold, 500.0);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn update_applies_and_persists_changes() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let updated = manager
        .update(|cfg| cfg.unusual_expense_multiplier = 5.0)
        .expect("update config");
    assert_eq!(updated.unusual_expense_multiplier, 5.0);
    assert_eq!(manager.load().expect("reload").unusual_expense_multiplier, 5.0);

    let reset = manager.reset().expect("reset");
    assert_eq!(reset.unusual_expense_multiplier, 3.0);
}

#[test]
fn save_rejects_out_of_range_fiscal_month() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = AppConfig {
        fiscal_start_month: 13,
        ..AppConfig::default()
    };
    let err = manager.save(&cfg).expect_err("month 13 is invalid");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_file_reports_serialization_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");
    let manager = ConfigManager::new(path);

    let err = manager.load().expect_err("malformed json");
    assert!(matches!(err, ConfigError::Serde(_)));
}

use docpilot::presentation::config::Settings;

#[test]
fn given_environment_overrides_when_settings_built_then_logging_follows_them() {
    let defaults = Settings::from_env();
    assert_eq!(defaults.logging.level, "info");
    assert!(!defaults.logging.enable_json);
    assert_eq!(defaults.intake.max_file_size_mb, 50);

    std::env::set_var("LOG_LEVEL", "debug");
    std::env::set_var("LOG_FORMAT", "JSON");

    let overridden = Settings::from_env();
    assert_eq!(overridden.logging.level, "debug");
    assert!(overridden.logging.enable_json);

    std::env::remove_var("LOG_LEVEL");
    std::env::remove_var("LOG_FORMAT");
}

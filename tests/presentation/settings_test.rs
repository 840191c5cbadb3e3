use lading::application::services::UnrecognizedPolicy;
use lading::presentation::Settings;

#[test]
fn given_no_sources_when_loading_defaults_then_service_defaults_apply() {
    let settings = Settings::from_builder(Settings::defaults().unwrap()).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.server.max_upload_size_mb, 25);
    assert!(settings.server.cors_origin.is_none());
    assert_eq!(settings.llm.model, "gpt-4o-mini");
    assert_eq!(settings.llm.base_url, "https://api.openai.com/v1");
    assert!(settings.llm.api_key.is_empty());
    assert_eq!(
        settings.extraction.allowed_extensions,
        vec![".pdf", ".xlsx", ".xls"]
    );
    assert_eq!(
        settings.extraction.unrecognized_policy,
        UnrecognizedPolicy::Skip
    );
    assert!(!settings.form.enabled);
    assert!(settings.form.url.is_none());
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn given_overrides_when_loading_then_overrides_win_over_defaults() {
    let builder = Settings::defaults()
        .unwrap()
        .set_override("llm.api_key", "sk-test")
        .unwrap()
        .set_override("extraction.unrecognized_policy", "reject")
        .unwrap()
        .set_override("form.enabled", true)
        .unwrap()
        .set_override("form.url", "http://forms.local/submit")
        .unwrap()
        .set_override("server.cors_origin", "http://localhost:3000")
        .unwrap();

    let settings = Settings::from_builder(builder).unwrap();

    assert_eq!(settings.llm.api_key, "sk-test");
    assert_eq!(
        settings.extraction.unrecognized_policy,
        UnrecognizedPolicy::Reject
    );
    assert!(settings.form.enabled);
    assert_eq!(
        settings.form.url.as_deref(),
        Some("http://forms.local/submit")
    );
    assert_eq!(
        settings.server.cors_origin.as_deref(),
        Some("http://localhost:3000")
    );
}

#[test]
fn given_missing_optional_override_when_loading_then_default_is_kept() {
    let builder = Settings::defaults()
        .unwrap()
        .set_override_option("llm.api_key", None::<String>)
        .unwrap();

    let settings = Settings::from_builder(builder).unwrap();

    assert!(settings.llm.api_key.is_empty());
}

use lading::application::ports::FormSubmitter;
use lading::domain::ExtractedRecord;
use lading::infrastructure::forms::FormSubmitterFactory;
use lading::presentation::config::FormSettings;

fn form_settings(enabled: bool, url: Option<&str>) -> FormSettings {
    FormSettings {
        enabled,
        url: url.map(String::from),
        timeout_secs: 10,
    }
}

#[test]
fn given_disabled_form_when_creating_then_returns_none() {
    let submitter = FormSubmitterFactory::create(&form_settings(false, Some("http://x"))).unwrap();

    assert!(submitter.is_none());
}

#[tokio::test]
async fn given_enabled_form_without_url_when_creating_then_stub_accepts_records() {
    let submitter = FormSubmitterFactory::create(&form_settings(true, None))
        .unwrap()
        .unwrap();

    let result = submitter.submit(&ExtractedRecord::default()).await;

    assert!(matches!(result, Ok(true)));
}

#[tokio::test]
async fn given_blank_url_when_creating_then_falls_back_to_stub() {
    let submitter = FormSubmitterFactory::create(&form_settings(true, Some("   ")))
        .unwrap()
        .unwrap();

    let result = submitter.submit(&ExtractedRecord::default()).await;

    assert!(matches!(result, Ok(true)));
}

#[test]
fn given_enabled_form_with_url_when_creating_then_returns_submitter() {
    let submitter =
        FormSubmitterFactory::create(&form_settings(true, Some("http://localhost:9/form")))
            .unwrap();

    assert!(submitter.is_some());
}

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use lading::application::ports::{FormSubmissionError, FormSubmitter};
use lading::domain::{ExtractedRecord, ShipmentFields};
use lading::infrastructure::forms::HttpFormSubmitter;

async fn start_mock_form_server(
    response_status: u16,
    delay: Duration,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/submit",
        post(move || async move {
            tokio::time::sleep(delay).await;
            StatusCode::from_u16(response_status).unwrap().into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}/submit", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (url, shutdown_tx)
}

fn record() -> ExtractedRecord {
    ExtractedRecord {
        fields: ShipmentFields {
            bill_of_lading_number: Some("BL123".into()),
            ..ShipmentFields::default()
        },
        raw_response: None,
    }
}

#[tokio::test]
async fn given_accepting_endpoint_when_submitting_then_returns_true() {
    let (url, shutdown_tx) = start_mock_form_server(200, Duration::ZERO).await;
    let submitter = HttpFormSubmitter::new(&url, Duration::from_secs(5)).unwrap();

    let result = submitter.submit(&record()).await;

    assert!(matches!(result, Ok(true)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rejecting_endpoint_when_submitting_then_returns_false() {
    let (url, shutdown_tx) = start_mock_form_server(422, Duration::ZERO).await;
    let submitter = HttpFormSubmitter::new(&url, Duration::from_secs(5)).unwrap();

    let result = submitter.submit(&record()).await;

    assert!(matches!(result, Ok(false)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_slow_endpoint_when_submitting_then_returns_timed_out() {
    let (url, shutdown_tx) = start_mock_form_server(200, Duration::from_secs(3)).await;
    let submitter = HttpFormSubmitter::new(&url, Duration::from_millis(100)).unwrap();

    let result = submitter.submit(&record()).await;

    assert!(matches!(result, Err(FormSubmissionError::TimedOut)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_endpoint_when_submitting_then_returns_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let submitter =
        HttpFormSubmitter::new(&format!("http://{addr}/submit"), Duration::from_secs(5)).unwrap();

    let result = submitter.submit(&record()).await;

    assert!(matches!(result, Err(FormSubmissionError::Transport(_))));
}

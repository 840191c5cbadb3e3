use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::application::services::ProcessingError;
use crate::domain::UploadedFile;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_documents_handler<L>(
    State(state): State<AppState<L>>,
    mut multipart: Multipart,
) -> Response
where
    L: LlmClient + ?Sized + 'static,
{
    let uploads = match read_uploads(&mut multipart).await {
        Ok(uploads) => uploads,
        Err(e) => {
            let status = e.status();
            tracing::error!(error = %e, %status, "Failed to read multipart");
            return error_response(status, format!("Failed to read multipart: {e}"));
        }
    };

    if uploads.is_empty() {
        tracing::warn!("Process request with no files");
        return error_response(StatusCode::BAD_REQUEST, "No files uploaded".to_string());
    }

    tracing::debug!(file_count = uploads.len(), "Processing uploaded documents");

    match state.processing_service.process(uploads).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            let status = match &e {
                ProcessingError::NoFiles => StatusCode::BAD_REQUEST,
                ProcessingError::UnsupportedDocument { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, e.to_string())
        }
    }
}

/// Collects every multipart field that carries a filename.
async fn read_uploads(multipart: &mut Multipart) -> Result<Vec<UploadedFile>, MultipartError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            tracing::debug!(field = ?field.name(), "Ignoring multipart field without filename");
            continue;
        };

        let data = field.bytes().await?;
        tracing::debug!(filename = %filename, bytes = data.len(), "File data received");
        uploads.push(UploadedFile::new(filename, data.to_vec()));
    }

    Ok(uploads)
}

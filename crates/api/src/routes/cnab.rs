//! Bank return file import.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    routing::post,
};
use serde::Serialize;
use tesouraria_core::cnab::CnabLayout;
use tesouraria_core::receivable::ReceivableStore;
use tesouraria_core::reconciliation::{ImportDirection, ImportRequest, ImportSummary};
use tesouraria_shared::config::ImportConfig;
use tesouraria_shared::types::TenantId;

use crate::AppState;
use crate::error::ApiError;

/// Room for multipart boundaries and the small text fields around the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Creates the import routes. The body limit follows `import.max_file_bytes`.
pub fn routes<S: ReceivableStore + 'static>(import: &ImportConfig) -> Router<AppState<S>> {
    Router::new().route(
        "/tenants/{tenant_id}/cnab/import",
        post(import_cnab::<S>).layer(DefaultBodyLimit::max(
            import.max_file_bytes.saturating_add(MULTIPART_OVERHEAD),
        )),
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a processed file.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Human-readable outcome.
    pub message: &'static str,
    /// Counters and per-line errors.
    pub data: ImportSummary,
}

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct Upload {
    layout: Option<CnabLayout>,
    direction: ImportDirection,
    filename: Option<String>,
    content: Option<Vec<u8>>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /tenants/{tenant_id}/cnab/import
///
/// Multipart fields: `layout` (optional, detected when absent), `type`
/// (`retorno` by default) and `file`.
async fn import_cnab<S: ReceivableStore>(
    State(state): State<AppState<S>>,
    Path(tenant_id): Path<TenantId>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let upload = read_upload(&mut multipart, state.import.max_file_bytes).await?;
    let Some(bytes) = upload.content else {
        return Err(ApiError::validation("No file provided"));
    };

    let request = ImportRequest {
        layout: upload.layout,
        direction: upload.direction,
        filename: upload.filename,
        // Undecodable bytes become U+FFFD; those lines fail the ASCII check.
        content: String::from_utf8_lossy(&bytes).into_owned(),
    };

    let summary = state
        .reconciliation
        .import(state.store.as_ref(), tenant_id, &request, state.clock.now())
        .await?;

    tracing::info!(
        tenant_id = %tenant_id,
        filename = request.filename.as_deref().unwrap_or("-"),
        processed = summary.processed,
        applied = summary.applied,
        duplicates = summary.duplicates,
        errors = summary.errors.len(),
        "Bank return file imported"
    );

    Ok(Json(ImportResponse {
        message: "Bank return file processed",
        data: summary,
    }))
}

async fn read_upload(multipart: &mut Multipart, max_file_bytes: usize) -> Result<Upload, ApiError> {
    let mut upload = Upload::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("layout") => {
                let text = field.text().await.map_err(multipart_error)?;
                let text = text.trim();
                if !text.is_empty() {
                    upload.layout = Some(text.parse().map_err(ApiError::validation)?);
                }
            }
            Some("type") => {
                let text = field.text().await.map_err(multipart_error)?;
                let text = text.trim();
                if !text.is_empty() {
                    upload.direction = text.parse().map_err(ApiError::validation)?;
                }
            }
            Some("file") => {
                upload.filename = field.file_name().map(str::to_owned);
                let data = field.bytes().await.map_err(multipart_error)?;
                if data.len() > max_file_bytes {
                    return Err(file_too_large(max_file_bytes));
                }
                upload.content = Some(data.to_vec());
            }
            _ => {}
        }
    }

    Ok(upload)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE", err.body_text());
    }
    ApiError::validation(format!("Invalid multipart body: {}", err.body_text()))
}

fn file_too_large(max_file_bytes: usize) -> ApiError {
    ApiError::new(
        StatusCode::PAYLOAD_TOO_LARGE,
        "FILE_TOO_LARGE",
        format!("File exceeds the limit of {max_file_bytes} bytes"),
    )
}

//! Document routes.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use convgate_core::document::{docx_to_pdf, DOCX_EXTENSION};
use convgate_core::ConvertError;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::download::attachment;
use crate::error::ServerError;
use crate::schemas::v1::files::DocxUpload;
use crate::state::AppState;
use crate::upload::{required, UploadBudget};

#[derive(OpenApi)]
#[openapi(paths(convert_docx_to_pdf), components(schemas(DocxUpload)))]
pub struct FilesApi;

/// Register document routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/files/convert/docx-to-pdf", post(convert_docx_to_pdf))
}

/// Re-lay the paragraphs of a DOCX document onto A4 PDF pages
/// (`POST /api/v1/files/convert/docx-to-pdf`).
///
/// Only paragraph text survives; styling, tables and images are dropped.
#[utoipa::path(
    post,
    path = "/api/v1/files/convert/docx-to-pdf",
    tag = "files",
    request_body(content = DocxUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF document (application/pdf)"),
        (status = 400, description = "Not a .docx file, or the document could not be read"),
        (status = 413, description = "Document too large"),
    )
)]
pub async fn convert_docx_to_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    let mut budget = UploadBudget::new(state.converter.limits());
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            debug!(field = ?field.name(), "ignoring unknown multipart field");
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_owned();
        // The extension decides before the document body is read.
        if !filename.to_ascii_lowercase().ends_with(DOCX_EXTENSION) {
            return Err(ConvertError::InvalidExtension { filename, expected: DOCX_EXTENSION }.into());
        }
        upload = Some((filename, budget.read_file(field).await?));
    }

    let (filename, data) = required("file", upload)?;
    let pdf = tokio::task::spawn_blocking(move || docx_to_pdf(&filename, &data)).await??;

    info!(bytes = pdf.len(), "document converted to pdf");
    attachment(pdf.into(), "application/pdf", "converted.pdf")
}

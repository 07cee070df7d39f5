//! Image routes: batch conversion into a ZIP archive, and single-image resize.
//!
//! Both handlers read the multipart body part by part. Limits are enforced
//! while reading, so an oversized batch is rejected without buffering the
//! rest of the request. Decoding and encoding run on the blocking pool.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use convgate_core::batch::write_archive;
use convgate_core::resize::resize_image as resize;
use convgate_core::{Quality, TargetFormat, UploadedFile};
use tracing::{debug, info, warn};
use utoipa::OpenApi;

use crate::download::{attachment, file_body};
use crate::error::ServerError;
use crate::schemas::v1::images::{ConvertImagesUpload, ResizeImageUpload};
use crate::state::AppState;
use crate::upload::{parse_field, read_text, required, UploadBudget};

#[derive(OpenApi)]
#[openapi(
    paths(convert_images, resize_image),
    components(schemas(ConvertImagesUpload, ResizeImageUpload))
)]
pub struct ImagesApi;

/// Register image routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/images/convert", post(convert_images))
        .route("/images/resize", post(resize_image))
}

/// Convert a batch of images to one format (`POST /api/v1/images/convert`).
///
/// Files that cannot be decoded are left out of the archive; they never fail
/// the request.
#[utoipa::path(
    post,
    path = "/api/v1/images/convert",
    tag = "images",
    request_body(content = ConvertImagesUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "ZIP archive (application/zip) of the converted images"),
        (status = 400, description = "Unknown target format or malformed request"),
        (status = 413, description = "Too many files or batch too large"),
    )
)]
pub async fn convert_images(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    let converter = Arc::clone(&state.converter);
    let limits = converter.limits();
    let mut budget = UploadBudget::new(limits);
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut target_format: Option<String> = None;
    let mut quality = Quality::DEFAULT;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "files" | "file" => {
                // Reject on the part header, before its body is read.
                limits.check_count(files.len() + 1)?;
                let filename = field.file_name().unwrap_or_default().to_owned();
                let data = budget.read_file(field).await?;
                files.push(UploadedFile::new(filename, data));
            }
            "target_format" => {
                let value = read_text(field).await?;
                converter.formats().resolve(&value)?;
                target_format = Some(value);
            }
            "quality" => {
                let value = read_text(field).await?;
                quality = Quality::new(parse_field("quality", &value)?);
            }
            other => debug!(field = other, "ignoring unknown multipart field"),
        }
    }

    let target_format = required("target_format", target_format)?;
    if files.is_empty() {
        return Err(ServerError::BadRequest("missing field 'files'".to_owned()));
    }
    let format = converter.validate(&target_format, &files)?;
    let received = files.len();

    let (archive, summary) = tokio::task::spawn_blocking(move || -> convgate_core::Result<_> {
        let tmp = tempfile::tempfile()?;
        write_archive(&files, format, quality, tmp)
    })
    .await??;

    if summary.converted() == 0 {
        warn!(received, skipped = summary.skipped, %format, "no file in the batch could be converted");
    } else {
        info!(received, converted = summary.converted(), skipped = summary.skipped, %format, "batch converted");
    }

    attachment(file_body(archive)?, "application/zip", &archive_name(format))
}

fn archive_name(format: TargetFormat) -> String {
    format!("converted_{}.zip", format.extension())
}

/// Resize one image to exact dimensions (`POST /api/v1/images/resize`).
///
/// The output keeps the format family and extension of the uploaded file.
#[utoipa::path(
    post,
    path = "/api/v1/images/resize",
    tag = "images",
    request_body(content = ResizeImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Resized image, same format family as the upload"),
        (status = 400, description = "Unsupported extension, bad dimensions or undecodable image"),
        (status = 413, description = "Image too large"),
    )
)]
pub async fn resize_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    let mut budget = UploadBudget::new(state.converter.limits());
    let mut file: Option<UploadedFile> = None;
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let data = budget.read_file(field).await?;
                file = Some(UploadedFile::new(filename, data));
            }
            "width" => width = Some(parse_field("width", &read_text(field).await?)?),
            "height" => height = Some(parse_field("height", &read_text(field).await?)?),
            other => debug!(field = other, "ignoring unknown multipart field"),
        }
    }

    let file = required("file", file)?;
    let width = required("width", width)?;
    let height = required("height", height)?;
    let max_dimension = state.config.max_resize_dimension;

    let resized = tokio::task::spawn_blocking(move || {
        resize(&file.filename, &file.data, width, height, max_dimension)
    })
    .await??;

    info!(width, height, bytes = resized.data.len(), "image resized");
    let name = resized.download_name();
    attachment(resized.data.into(), resized.mime_type, &name)
}

//! Attachment responses, buffered or streamed from a temp file.

use std::fs::File;
use std::io::{Seek, SeekFrom};

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use bytes::{Bytes, BytesMut};
use futures::stream;
use tokio::io::AsyncReadExt;

use crate::error::ServerError;

const CHUNK_SIZE: usize = 64 * 1024;

pub fn attachment(body: Body, content_type: &str, filename: &str) -> Result<Response, ServerError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\""))
        .body(body)
        .map_err(|e| ServerError::Internal(format!("failed to build response: {e}")))
}

/// Rewind `file` and stream it out in fixed-size chunks.
///
/// The file is unlinked (see [`tempfile::tempfile`]) so it disappears once
/// the stream is dropped, whether or not the client read it all.
pub fn file_body(mut file: File) -> Result<Body, ServerError> {
    file.seek(SeekFrom::Start(0)).map_err(|e| ServerError::Internal(e.to_string()))?;
    let file = tokio::fs::File::from_std(file);

    let chunks = stream::try_unfold(file, |mut file| async move {
        let mut buf = BytesMut::zeroed(CHUNK_SIZE);
        let n = file.read(&mut buf).await?;
        if n == 0 {
            return Ok::<_, std::io::Error>(None);
        }
        buf.truncate(n);
        Ok(Some((Bytes::from(buf), file)))
    });
    Ok(Body::from_stream(chunks))
}

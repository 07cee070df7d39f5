//! Helpers for pulling typed values out of multipart fields.

use std::str::FromStr;

use axum::extract::multipart::Field;
use bytes::{Bytes, BytesMut};
use convgate_core::ConversionLimits;

use crate::error::ServerError;

/// Running byte count across every file part of one request.
#[derive(Debug, Clone, Copy)]
pub struct UploadBudget {
    limits: ConversionLimits,
    received: u64,
}

impl UploadBudget {
    pub fn new(limits: ConversionLimits) -> Self {
        Self { limits, received: 0 }
    }

    /// Read a file part to the end, failing as soon as the running total
    /// crosses the cap.
    pub async fn read_file(&mut self, mut field: Field<'_>) -> Result<Bytes, ServerError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = field.chunk().await? {
            self.received += chunk.len() as u64;
            self.limits.check_total(self.received)?;
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

pub async fn read_text(field: Field<'_>) -> Result<String, ServerError> {
    let name = field.name().unwrap_or_default().to_owned();
    field
        .text()
        .await
        .map_err(|e| ServerError::BadRequest(format!("field '{name}': {}", e.body_text())))
}

pub fn parse_field<T: FromStr>(name: &str, value: &str) -> Result<T, ServerError> {
    value
        .trim()
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("field '{name}' has an invalid value: '{value}'")))
}

pub fn required<T>(name: &str, value: Option<T>) -> Result<T, ServerError> {
    value.ok_or_else(|| ServerError::BadRequest(format!("missing field '{name}'")))
}

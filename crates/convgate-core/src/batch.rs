//! Batch image conversion into a single ZIP archive.
//!
//! The batch is best-effort: an input that fails to decode or encode is
//! dropped from the archive and counted in [`BatchSummary::skipped`]; it never
//! fails the request. Limits and the target format, on the other hand, are
//! checked up front and reject the whole batch before any conversion work.

use std::collections::HashSet;
use std::io::{Seek, Write};
use std::path::Path;

use bytes::Bytes;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ConvertError, Result};
use crate::format::{FormatAllowList, TargetFormat};
use crate::raster::{self, Quality};

/// Default cap on the number of files per batch.
pub const DEFAULT_MAX_FILES: usize = 50;
/// Default cap on the summed size of all files in a batch (100 MiB).
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 100 * 1024 * 1024;

const FALLBACK_STEM: &str = "image";

/// One uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self { filename: filename.into(), data: data.into() }
    }
}

/// Per-request limits on a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionLimits {
    pub max_files: usize,
    pub max_total_bytes: u64,
}

impl Default for ConversionLimits {
    fn default() -> Self {
        Self { max_files: DEFAULT_MAX_FILES, max_total_bytes: DEFAULT_MAX_TOTAL_BYTES }
    }
}

impl ConversionLimits {
    pub fn check_count(&self, count: usize) -> Result<()> {
        if count > self.max_files {
            return Err(ConvertError::TooManyFiles { count, max: self.max_files });
        }
        Ok(())
    }

    pub fn check_total(&self, total: u64) -> Result<()> {
        if total > self.max_total_bytes {
            return Err(ConvertError::PayloadTooLarge { total, max: self.max_total_bytes });
        }
        Ok(())
    }
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Archive entry names, in the order they were written.
    pub entries: Vec<String>,
    /// Inputs dropped because they could not be converted.
    pub skipped: usize,
}

impl BatchSummary {
    pub fn converted(&self) -> usize {
        self.entries.len()
    }
}

/// Converts a batch of images and packs the results into a ZIP archive.
#[derive(Debug, Clone, Default)]
pub struct BatchConverter {
    formats: FormatAllowList,
    limits: ConversionLimits,
}

impl BatchConverter {
    pub fn new(formats: FormatAllowList, limits: ConversionLimits) -> Self {
        Self { formats, limits }
    }

    pub fn formats(&self) -> &FormatAllowList {
        &self.formats
    }

    pub fn limits(&self) -> ConversionLimits {
        self.limits
    }

    /// Check format, count and total size, in that order.
    pub fn validate(&self, target_format: &str, files: &[UploadedFile]) -> Result<TargetFormat> {
        let format = self.formats.resolve(target_format)?;
        self.limits.check_count(files.len())?;
        let total: u64 = files.iter().map(|f| f.data.len() as u64).sum();
        self.limits.check_total(total)?;
        Ok(format)
    }

    /// Validate the request, then write the archive into `writer`.
    ///
    /// Nothing is written when validation fails. Returns the finished writer
    /// so the caller can rewind and stream it.
    pub fn convert_batch<W: Write + Seek>(
        &self,
        files: &[UploadedFile],
        target_format: &str,
        quality: Quality,
        writer: W,
    ) -> Result<(W, BatchSummary)> {
        let format = self.validate(target_format, files)?;
        write_archive(files, format, quality, writer)
    }
}

/// Convert every file to `format` and store the successes in a ZIP archive.
///
/// An all-failing input set still produces a valid, empty archive.
pub fn write_archive<W: Write + Seek>(
    files: &[UploadedFile],
    format: TargetFormat,
    quality: Quality,
    writer: W,
) -> Result<(W, BatchSummary)> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut names = EntryNames::default();

    let summary = files.iter().try_fold(BatchSummary::default(), |mut summary, file| {
        match raster::convert_image(&file.data, format, quality) {
            Ok(converted) => {
                let name = names.claim(&entry_stem(&file.filename), format.extension());
                zip.start_file(name.clone(), options)?;
                zip.write_all(&converted)?;
                summary.entries.push(name);
            }
            Err(e) => {
                debug!(filename = %file.filename, error = %e, "skipping file that could not be converted");
                summary.skipped += 1;
            }
        }
        Ok::<_, ConvertError>(summary)
    })?;

    let writer = zip.finish()?;
    Ok((writer, summary))
}

/// Stem of the last path component of a client-supplied filename.
pub fn entry_stem(filename: &str) -> String {
    let last = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    Path::new(last)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_STEM)
        .to_owned()
}

// ZIP writers refuse duplicate entry names.
#[derive(Debug, Default)]
struct EntryNames {
    used: HashSet<String>,
}

impl EntryNames {
    fn claim(&mut self, stem: &str, extension: &str) -> String {
        let mut name = format!("{stem}.{extension}");
        let mut n = 1;
        while self.used.contains(&name) {
            name = format!("{stem}_{n}.{extension}");
            n += 1;
        }
        self.used.insert(name.clone());
        name
    }
}

use thiserror::Error;

/// Errors that can be returned by convgate-core operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The requested batch target format is not in the allow-list.
    #[error("format '{0}' is not supported")]
    InvalidFormat(String),

    /// The batch contains more files than allowed.
    #[error("too many files: {count} exceeds the maximum of {max}")]
    TooManyFiles { count: usize, max: usize },

    /// The batch payload is larger than allowed.
    #[error("payload too large: {total} bytes exceeds the maximum of {max} bytes")]
    PayloadTooLarge { total: u64, max: u64 },

    /// A single-file upload carries an extension this operation cannot handle.
    #[error("unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    /// The uploaded document does not carry the expected extension.
    #[error("expected a {expected} file, got '{filename}'")]
    InvalidExtension { filename: String, expected: &'static str },

    /// Requested output dimensions are zero or above the configured cap.
    #[error("invalid dimensions {width}x{height}: each side must be between 1 and {max}")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    /// The payload is not a valid instance of the type it claims to be.
    #[error("failed to decode input: {0}")]
    Decode(String),

    /// Encoding the output failed.
    #[error("failed to encode output: {0}")]
    Encode(String),

    /// A unit symbol is not in the registry.
    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),

    /// The two units measure different dimensions.
    #[error("cannot convert from '{from}' to '{to}'")]
    IncompatibleUnits { from: String, to: String },

    /// The rate table has no entry for the target currency.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// The rate service could not be reached or answered with an unexpected shape.
    #[error("rate service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A filesystem I/O error occurred while buffering output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the output archive failed.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape or limits.
    Validation,
    /// Malformed payload for its claimed type.
    Decode,
    /// Unknown format, unit or currency.
    UnsupportedOption,
    /// The external rate service failed.
    Upstream,
    /// Failure on our side; details must not reach the caller.
    Internal,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::TooManyFiles { .. }
            | ConvertError::PayloadTooLarge { .. }
            | ConvertError::InvalidExtension { .. }
            | ConvertError::InvalidDimensions { .. } => ErrorKind::Validation,
            ConvertError::Decode(_) => ErrorKind::Decode,
            ConvertError::InvalidFormat(_)
            | ConvertError::UnsupportedFormat(_)
            | ConvertError::UnknownUnit(_)
            | ConvertError::IncompatibleUnits { .. }
            | ConvertError::UnknownCurrency(_) => ErrorKind::UnsupportedOption,
            ConvertError::UpstreamUnavailable(_) => ErrorKind::Upstream,
            ConvertError::Encode(_) | ConvertError::Io(_) | ConvertError::Zip(_) => {
                ErrorKind::Internal
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

//! convgate-core: the conversion logic behind the convgate HTTP gateway.
//!
//! Every operation is a plain function over bytes or values and knows
//! nothing about HTTP:
//!
//! - [`batch`]: many images to one target format, packed into a ZIP archive.
//! - [`resize`]: exact-size resize of a single image.
//! - [`document`]: DOCX paragraphs re-laid onto PDF pages.
//! - [`units`]: scalar unit conversion.
//! - [`currency`]: currency conversion through a [`currency::RateProvider`].

pub mod batch;
pub mod currency;
pub mod document;
pub mod error;
pub mod format;
pub mod raster;
pub mod resize;
pub mod units;

pub use batch::{BatchConverter, BatchSummary, ConversionLimits, UploadedFile};
pub use currency::{HttpRateProvider, RateProvider};
pub use error::{ConvertError, ErrorKind, Result};
pub use format::{FormatAllowList, TargetFormat};
pub use raster::Quality;
pub use resize::ResizedImage;
pub use units::UnitRegistry;

/// Result of a scalar conversion, rendered as text on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    pub input: String,
    pub output: String,
}

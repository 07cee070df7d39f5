pub mod currency;
pub mod files;
pub mod images;
pub mod units;

use convgate_core::ConversionOutput;
use serde::Serialize;
use utoipa::ToSchema;

/// Response body shared by the unit and currency endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConversionResponse {
    /// The input quantity, e.g. `"1.0 km"`.
    #[schema(example = "1.0 km")]
    pub input: String,
    /// The converted quantity, e.g. `"1000.0 meter"`.
    #[schema(example = "1000.0 meter")]
    pub output: String,
}

impl From<ConversionOutput> for ConversionResponse {
    fn from(out: ConversionOutput) -> Self {
        Self { input: out.input, output: out.output }
    }
}

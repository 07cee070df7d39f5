use serde::Deserialize;
use utoipa::ToSchema;

/// Form body of `POST /api/v1/units/convert`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UnitConvertForm {
    #[schema(example = 1.0)]
    pub value: f64,
    /// Unit name, plural or symbol, e.g. `km`.
    #[schema(example = "km")]
    pub from_unit: String,
    #[schema(example = "m")]
    pub to_unit: String,
}

use serde::Deserialize;
use utoipa::ToSchema;

/// Form body of `POST /api/v1/currency/convert`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CurrencyConvertForm {
    #[schema(example = 100.0)]
    pub value: f64,
    /// ISO 4217 code, case-insensitive.
    #[schema(example = "USD")]
    pub from_currency: String,
    #[schema(example = "EUR")]
    pub to_currency: String,
}

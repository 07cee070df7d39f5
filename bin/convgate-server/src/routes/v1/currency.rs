//! Currency conversion route, backed by the configured [`RateProvider`].
//!
//! [`RateProvider`]: convgate_core::RateProvider

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Form, Json, Router};
use convgate_core::currency::convert_currency as convert;
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::v1::currency::CurrencyConvertForm;
use crate::schemas::v1::ConversionResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(convert_currency), components(schemas(CurrencyConvertForm, ConversionResponse)))]
pub struct CurrencyApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/currency/convert", post(convert_currency))
}

/// Convert an amount using the latest exchange rates.
///
/// One upstream lookup per request, no caching and no retries.
#[utoipa::path(
    post,
    path = "/api/v1/currency/convert",
    tag = "currency",
    request_body(content = CurrencyConvertForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Converted amount", body = ConversionResponse),
        (status = 400, description = "Unknown currency code"),
        (status = 502, description = "Rate service unavailable"),
    )
)]
pub async fn convert_currency(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CurrencyConvertForm>, FormRejection>,
) -> Result<Json<ConversionResponse>, ServerError> {
    let Form(req) = form.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    debug!(from = %req.from_currency, to = %req.to_currency, "currency conversion requested");
    let out = convert(state.rates.as_ref(), req.value, &req.from_currency, &req.to_currency).await?;
    Ok(Json(out.into()))
}

//! Unit conversion route.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Form, Json, Router};
use convgate_core::units::convert_units;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::v1::units::UnitConvertForm;
use crate::schemas::v1::ConversionResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(convert_unit), components(schemas(UnitConvertForm, ConversionResponse)))]
pub struct UnitsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/units/convert", post(convert_unit))
}

/// Convert a quantity between two units of the same dimension.
#[utoipa::path(
    post,
    path = "/api/v1/units/convert",
    tag = "units",
    request_body(content = UnitConvertForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Converted quantity", body = ConversionResponse),
        (status = 400, description = "Unknown or incompatible units"),
    )
)]
pub async fn convert_unit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<UnitConvertForm>, FormRejection>,
) -> Result<Json<ConversionResponse>, ServerError> {
    let Form(req) = form.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let out = convert_units(&state.units, req.value, &req.from_unit, &req.to_unit)?;
    Ok(Json(out.into()))
}

pub mod currency;
pub mod files;
pub mod images;
pub mod units;

use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;

use crate::state::AppState;

/// Routes nested under `/api/v1`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(images::router())
        .merge(files::router())
        .merge(units::router())
        .merge(currency::router())
}

#[derive(OpenApi)]
#[openapi()]
pub struct V1Api;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut doc = V1Api::openapi();
    doc.merge(images::ImagesApi::openapi());
    doc.merge(files::FilesApi::openapi());
    doc.merge(units::UnitsApi::openapi());
    doc.merge(currency::CurrencyApi::openapi());
    doc
}

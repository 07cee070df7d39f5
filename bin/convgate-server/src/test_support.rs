//! Router-level test helpers: hand-built request bodies and in-memory rates.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use convgate_core::currency::RateTable;
use convgate_core::{ConvertError, RateProvider};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::routes;
use crate::state::AppState;

const BOUNDARY: &str = "convgate-test-boundary";

pub struct FixedRates(RateTable);

impl FixedRates {
    pub fn new(pairs: &[(&str, f64)]) -> Self {
        Self(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }
}

#[async_trait]
impl RateProvider for FixedRates {
    async fn latest_rates(&self, _base: &str) -> convgate_core::Result<RateTable> {
        Ok(self.0.clone())
    }
}

pub struct UnavailableRates;

#[async_trait]
impl RateProvider for UnavailableRates {
    async fn latest_rates(&self, _base: &str) -> convgate_core::Result<RateTable> {
        Err(ConvertError::UpstreamUnavailable("request timed out".to_owned()))
    }
}

pub fn test_app(config: Config) -> Router {
    test_app_with_rates(config, Arc::new(FixedRates::new(&[("EUR", 0.9)])))
}

pub fn test_app_with_rates(config: Config, rates: Arc<dyn RateProvider>) -> Router {
    routes::build(Arc::new(AppState::new(config, rates)))
}

/// A `multipart/form-data` body assembled by hand.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn post(mut self, uri: &str) -> Request<Body> {
        self.body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::post(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(self.body))
            .unwrap()
    }
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

pub fn error_message(resp: &TestResponse) -> String {
    resp.json()["error"].as_str().unwrap_or_default().to_owned()
}

pub async fn send(app: Router, req: Request<Body>) -> TestResponse {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    TestResponse { status, headers, body }
}

/// An opaque RGB gradient encoded as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| image::Rgb([(x as u8).wrapping_mul(9), (y as u8).wrapping_mul(7), 128]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

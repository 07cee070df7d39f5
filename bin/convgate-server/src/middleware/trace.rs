//! Per-request trace IDs and access logging.
//!
//! Bodies are never buffered here: uploads and ZIP downloads stream straight
//! through, so only the method, path, status and latency are recorded.

use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

pub async fn trace_middleware(mut req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    // Reuse a caller-supplied trace ID when it is a valid UUID.
    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let header = HeaderValue::from_str(&trace_id.to_string()).ok();
        if let Some(value) = &header {
            req.headers_mut().insert(X_TRACE_ID, value.clone());
        }

        let mut response = next.run(req).await;

        if let Some(value) = header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }
        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod test {
    use axum::http::Request;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(trace_middleware))
    }

    #[tokio::test]
    async fn response_carries_generated_trace_id() {
        let resp = app().oneshot(Request::new(Body::empty())).await.unwrap();
        let id = resp.headers().get(X_TRACE_ID).expect("trace id header");
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn caller_trace_id_is_echoed() {
        let id = Uuid::new_v4().to_string();
        let req = Request::builder().uri("/").header(X_TRACE_ID, &id).body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[X_TRACE_ID], id.as_str());
    }

    #[tokio::test]
    async fn malformed_trace_id_is_replaced() {
        let req =
            Request::builder().uri("/").header(X_TRACE_ID, "not-a-uuid").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_ne!(resp.headers()[X_TRACE_ID], "not-a-uuid");
    }
}

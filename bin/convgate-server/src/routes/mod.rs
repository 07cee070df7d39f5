//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace ID, request body cap)
//! - Optional Swagger UI / OpenAPI document endpoint (disable with `CONVGATE_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - Conversion routes under `/api/v1`

pub mod doc;
mod health;
mod v1;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new().merge(health::router()).nest("/api/v1", v1::router());

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(
            ServiceBuilder::new()
                .layer(cors::cors_layer(&state.config))
                .layer(middleware::from_fn(trace::trace_middleware))
                .layer(DefaultBodyLimit::max(state.config.body_limit())),
        )
        .with_state(state)
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use crate::config::Config;
    use crate::middleware::trace::X_TRACE_ID;
    use crate::test_support::{send, test_app};

    #[tokio::test]
    async fn openapi_document_lists_every_route() {
        let req = Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap();
        let resp = send(test_app(Config::default()), req).await;
        assert_eq!(resp.status, StatusCode::OK);

        let doc = resp.json();
        for path in [
            "/health",
            "/api/v1/images/convert",
            "/api/v1/images/resize",
            "/api/v1/files/convert/docx-to-pdf",
            "/api/v1/units/convert",
            "/api/v1/currency/convert",
        ] {
            assert!(doc["paths"][path].is_object(), "missing {path}");
        }
    }

    #[tokio::test]
    async fn swagger_can_be_disabled() {
        let config = Config { enable_swagger: false, ..Config::default() };
        let req = Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap();
        let resp = send(test_app(config), req).await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn every_response_carries_a_trace_id() {
        let req = Request::get("/health").body(Body::empty()).unwrap();
        let resp = send(test_app(Config::default()), req).await;
        assert!(resp.headers.contains_key(X_TRACE_ID));
    }
}

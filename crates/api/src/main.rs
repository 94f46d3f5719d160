mod docs;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thematic_core::classify::Classifier;
use thematic_core::domain::classification::{ClassificationRequest, ClassificationResponse};
use thematic_core::llm::openai::OpenAiClient;

const DEFAULT_PORT: u16 = 8000;
const LIVENESS_MESSAGE: &str = "Thematic Classification API is running!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = thematic_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    // A missing key must stop the process before it accepts traffic.
    let llm = OpenAiClient::from_settings(&settings).inspect_err(|e| {
        sentry_anyhow::capture_anyhow(e);
        tracing::error!(error = %e, "OpenAI client configuration failed");
    })?;

    let state = AppState {
        classifier: Classifier::new(Arc::new(llm)),
    };
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, title = docs::TITLE, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/classify", post(classify_10k))
        .route("/openapi.json", get(docs::openapi_json))
        .route("/docs", get(docs::swagger_ui))
        .route("/redoc", get(docs::redoc_ui))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[derive(Clone)]
struct AppState {
    classifier: Classifier,
}

#[derive(Debug, Serialize)]
struct Liveness {
    message: &'static str,
}

async fn home() -> Json<Liveness> {
    Json(Liveness {
        message: LIVENESS_MESSAGE,
    })
}

/// Outbound failures are returned as `{"error": ...}` with a 200 status.
async fn classify_10k(
    State(state): State<AppState>,
    Json(request): Json<ClassificationRequest>,
) -> Json<ClassificationResponse> {
    Json(state.classifier.respond(request).await)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &thematic_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use thematic_core::llm::{ChatCompletionClient, Provider};
    use tower::ServiceExt;

    struct StubClient {
        reply: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ChatCompletionClient for StubClient {
        fn provider(&self) -> Provider {
            Provider::OpenAI
        }

        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .map(str::to_string)
                .map_err(|e| anyhow::anyhow!(e))
        }
    }

    fn app_with(reply: Result<&'static str, &'static str>) -> (Router, Arc<StubClient>) {
        let stub = Arc::new(StubClient {
            reply,
            calls: AtomicUsize::new(0),
        });
        let state = AppState {
            classifier: Classifier::new(stub.clone()),
        };
        (router(state), stub)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_returns_liveness_message() {
        let (app, _) = app_with(Ok("unused"));
        let res = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({"message": "Thematic Classification API is running!"})
        );
    }

    #[tokio::test]
    async fn classify_echoes_input_with_trimmed_classification() {
        let (app, stub) = app_with(Ok(" Technology; Consumer Electronics\n"));
        let res = app
            .oneshot(post_json(
                "/classify",
                json!({"ticker": "AAPL", "filing_date": "2024-02-01"}),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({
                "ticker": "AAPL",
                "filing_date": "2024-02-01",
                "classification": "Technology; Consumer Electronics",
            })
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn classify_failure_is_error_body_with_ok_status() {
        let (app, _) = app_with(Err("rate limited"));
        let res = app
            .oneshot(post_json(
                "/classify",
                json!({"ticker": "AAPL", "filing_date": "2024-02-01"}),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({"error": "rate limited"}));
    }

    #[tokio::test]
    async fn classify_rejects_missing_field_before_outbound_call() {
        for body in [
            json!({"ticker": "AAPL"}),
            json!({"filing_date": "2024-02-01"}),
            json!({"ticker": 42, "filing_date": "2024-02-01"}),
        ] {
            let (app, stub) = app_with(Ok("unused"));
            let res = app.oneshot(post_json("/classify", body)).await.unwrap();

            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn classify_rejects_non_json_content_type() {
        let (app, stub) = app_with(Ok("unused"));
        let req = Request::post("/classify")
            .body(Body::from(r#"{"ticker":"AAPL","filing_date":"2024-02-01"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn docs_routes_serve_html_and_openapi() {
        for (uri, content_type) in [
            ("/docs", "text/html; charset=utf-8"),
            ("/redoc", "text/html; charset=utf-8"),
            ("/openapi.json", "application/json"),
        ] {
            let (app, _) = app_with(Ok("unused"));
            let res = app
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(res.status(), StatusCode::OK, "{uri}");
            assert_eq!(res.headers()[header::CONTENT_TYPE], content_type, "{uri}");
        }
    }
}

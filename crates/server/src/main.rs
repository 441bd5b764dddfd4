use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::Prescription,
    error::{ApiError, ErrorCode},
    protocol::{ErrorBody, LookupRequest, LOOKUP_ROUTE},
};
use storage::Storage;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::{error, info, warn};

mod api;
mod config;

use api::{get_prescription, seed_from_file, LookupContext};
use config::{load_settings, normalize_database_url};

const MAX_LOOKUP_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
struct AppState {
    lookup: LookupContext,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let lookup = LookupContext { storage };

    if let Some(seed_file) = settings.seed_file.as_deref() {
        seed_from_file(&lookup, seed_file).await?;
    }

    let app = build_router(Arc::new(AppState { lookup }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "prescription lookup listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(LOOKUP_ROUTE, post(http_get_prescription))
        .layer(RequestBodyLimitLayer::new(MAX_LOOKUP_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: ApiError) -> (StatusCode, Json<ErrorBody>) {
    (status_for(err.code), Json(err.into()))
}

async fn healthz(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ErrorBody>)> {
    state.lookup.storage.health_check().await.map_err(|e| {
        warn!(error = %e, "healthz: storage unavailable");
        error_response(ApiError::internal(e.to_string()))
    })?;
    Ok("ok")
}

/// Bodies that are not a JSON object are treated as carrying no patient id.
async fn http_get_prescription(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Prescription>, (StatusCode, Json<ErrorBody>)> {
    let request = serde_json::from_slice::<LookupRequest>(&body).unwrap_or_default();
    get_prescription(&state.lookup, request)
        .await
        .map(Json)
        .map_err(error_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{self, Body},
        http::{header, Request},
    };
    use shared::domain::{CodeId, Medicine};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let storage = Storage::new("sqlite::memory:").await.expect("db");
        storage
            .upsert_prescription(&Prescription {
                patient_name: "Jane Doe".into(),
                patient_age: 40,
                phone_number: "555-1111".into(),
                code_id: CodeId::parse("ABC123").expect("code"),
                medicines: vec![Medicine {
                    name: "Ibuprofen".into(),
                    routine: vec!["morning".into()],
                    timing: "after food".into(),
                    no_of_tablets: 3,
                }],
            })
            .await
            .expect("seed");
        build_router(Arc::new(AppState {
            lookup: LookupContext { storage },
        }))
    }

    fn lookup_request(body: &str) -> Request<Body> {
        Request::post(LOOKUP_ROUTE)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn healthz_reports_ok_when_storage_is_ready() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn known_patient_id_returns_camel_case_prescription() {
        let app = test_app().await;
        let response = app
            .oneshot(lookup_request(r#"{"patientId":"ABC123"}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["patientName"], "Jane Doe");
        assert_eq!(body["codeId"], "ABC123");
        assert_eq!(body["medicines"][0]["noOfTablets"], 3);
    }

    #[tokio::test]
    async fn unknown_patient_id_is_404_with_reason() {
        let app = test_app().await;
        let response = app
            .oneshot(lookup_request(r#"{"patientId":"BAD"}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "No prescription found for this patient ID"})
        );
    }

    #[tokio::test]
    async fn missing_patient_id_is_400() {
        let app = test_app().await;
        for body in ["{}", r#"{"patientId":"  "}"#, "not json"] {
            let response = app
                .clone()
                .oneshot(lookup_request(body))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(
                json_body(response).await,
                serde_json::json!({"error": "Patient ID is required"})
            );
        }
    }

    #[tokio::test]
    async fn cors_allows_browser_kiosks() {
        let app = test_app().await;
        let request = Request::post(LOOKUP_ROUTE)
            .header(header::ORIGIN, "http://kiosk.local:3000")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"patientId":"ABC123"}"#))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .expect("cors header"),
            "*"
        );
    }
}

use std::sync::{Arc, Mutex};

use super::*;
use axum::{extract::State, http::StatusCode as HttpStatus, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Backend {
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn get_prescription(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (HttpStatus, Json<Value>) {
    backend.requests.lock().unwrap().push(body.clone());
    match body.get("patientId").and_then(Value::as_str) {
        Some("ABC123") => (
            HttpStatus::OK,
            Json(json!({
                "patientName": "Jane Doe",
                "patientAge": 40,
                "phoneNumber": "555-1111",
                "medicines": [
                    {"name": "Ibuprofen", "routine": ["morning"], "timing": "after food", "noOfTablets": 3}
                ],
                "codeId": "ABC123"
            })),
        ),
        Some("OTHER") => (
            HttpStatus::OK,
            Json(json!({
                "patientName": "Jane Doe",
                "patientAge": 40,
                "phoneNumber": "555-1111",
                "medicines": [],
                "codeId": "SOMEONE-ELSE"
            })),
        ),
        Some("SHAPE") => (HttpStatus::OK, Json(json!({"patientName": "Jane Doe"}))),
        Some("QUIET") => (HttpStatus::NOT_FOUND, Json(json!({}))),
        Some("CRASH") => (HttpStatus::INTERNAL_SERVER_ERROR, Json(json!({}))),
        Some("BOOM") => (
            HttpStatus::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "database offline"})),
        ),
        _ => (HttpStatus::NOT_FOUND, Json(json!({"error": "Invalid code"}))),
    }
}

async fn spawn_backend() -> anyhow::Result<(Url, Backend)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let backend = Backend::default();
    let app = Router::new()
        .route("/get-prescription", post(get_prescription))
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((Url::parse(&format!("http://{addr}/get-prescription"))?, backend))
}

fn code(raw: &str) -> CodeId {
    CodeId::parse(raw).unwrap()
}

#[tokio::test]
async fn posts_patient_id_and_parses_prescription() -> anyhow::Result<()> {
    let (url, backend) = spawn_backend().await?;
    let lookup = HttpPrescriptionLookup::new(url);

    let prescription = lookup.lookup(&code("ABC123")).await?;

    assert_eq!(prescription.patient_name, "Jane Doe");
    assert_eq!(prescription.medicines[0].no_of_tablets, 3);
    assert_eq!(
        backend.requests.lock().unwrap().as_slice(),
        &[json!({"patientId": "ABC123"})]
    );
    Ok(())
}

#[tokio::test]
async fn client_error_surfaces_server_reason() -> anyhow::Result<()> {
    let (url, _) = spawn_backend().await?;
    let err = HttpPrescriptionLookup::new(url)
        .lookup(&code("BAD"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::NotFound {
            status: 404,
            reason: "Invalid code".into()
        }
    );
    assert_eq!(err.user_message(), "Invalid code");
    Ok(())
}

#[tokio::test]
async fn client_error_without_reason_uses_generic_message() -> anyhow::Result<()> {
    let (url, _) = spawn_backend().await?;
    let err = HttpPrescriptionLookup::new(url)
        .lookup(&code("QUIET"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), GENERIC_LOOKUP_FAILURE);
    Ok(())
}

#[tokio::test]
async fn server_error_is_a_network_failure_with_reason() -> anyhow::Result<()> {
    let (url, _) = spawn_backend().await?;
    let err = HttpPrescriptionLookup::new(url)
        .lookup(&code("BOOM"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
    assert_eq!(err.user_message(), "database offline");
    Ok(())
}

#[tokio::test]
async fn server_error_without_reason_uses_generic_message() -> anyhow::Result<()> {
    let (url, _) = spawn_backend().await?;
    let err = HttpPrescriptionLookup::new(url)
        .lookup(&code("CRASH"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network { reason: Some(_), .. }));
    assert_eq!(err.user_message(), GENERIC_LOOKUP_FAILURE);
    Ok(())
}

#[test]
fn any_answered_failure_shows_server_text_or_generic() {
    let empty = interpret_response(&code("ABC123"), StatusCode::INTERNAL_SERVER_ERROR, b"{}")
        .unwrap_err();
    assert_eq!(empty.user_message(), "Invalid code");

    let garbage = interpret_response(&code("ABC123"), StatusCode::BAD_GATEWAY, b"<html>")
        .unwrap_err();
    assert_eq!(garbage.user_message(), "Invalid code");

    let quiet = interpret_response(&code("ABC123"), StatusCode::NOT_FOUND, b"").unwrap_err();
    assert_eq!(quiet.user_message(), "Invalid code");
}

#[tokio::test]
async fn mismatched_or_malformed_success_fails_closed() -> anyhow::Result<()> {
    let (url, _) = spawn_backend().await?;
    let lookup = HttpPrescriptionLookup::new(url);

    let mismatch = lookup.lookup(&code("OTHER")).await.unwrap_err();
    assert!(matches!(mismatch, FetchError::InvalidResponse(_)));

    let shape = lookup.lookup(&code("SHAPE")).await.unwrap_err();
    assert!(matches!(shape, FetchError::InvalidResponse(_)));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() -> anyhow::Result<()> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let lookup = HttpPrescriptionLookup::new(Url::parse(&format!(
        "http://{addr}/get-prescription"
    ))?);
    let err = lookup.lookup(&code("ABC123")).await.unwrap_err();

    assert!(matches!(err, FetchError::Network { reason: None, .. }));
    assert_eq!(err.user_message(), UNREACHABLE_SERVICE);
    Ok(())
}

#[test]
fn from_config_uses_configured_endpoint() -> anyhow::Result<()> {
    let mut config = KioskConfig::new(Url::parse("http://kiosk-backend:5000/get-prescription")?);
    config.request_timeout = Some(std::time::Duration::from_secs(2));
    let lookup = HttpPrescriptionLookup::from_config(&config)?;
    assert_eq!(lookup.endpoint().host_str(), Some("kiosk-backend"));
    Ok(())
}

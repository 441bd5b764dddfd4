use super::*;
use shared::{domain::Medicine, error::ErrorCode};

fn jane() -> Prescription {
    Prescription {
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
    }
}

async fn setup() -> LookupContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.upsert_prescription(&jane()).await.expect("seed");
    LookupContext { storage }
}

fn request(patient_id: Option<&str>) -> LookupRequest {
    LookupRequest {
        patient_id: patient_id.map(str::to_string),
    }
}

#[tokio::test]
async fn known_code_returns_prescription() {
    let ctx = setup().await;
    let prescription = get_prescription(&ctx, request(Some(" ABC123 ")))
        .await
        .expect("found");
    assert_eq!(prescription, jane());
}

#[tokio::test]
async fn missing_or_blank_patient_id_is_a_validation_error() {
    let ctx = setup().await;
    for patient_id in [None, Some(""), Some("   ")] {
        let err = get_prescription(&ctx, request(patient_id))
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.message, PATIENT_ID_REQUIRED);
    }
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let ctx = setup().await;
    let err = get_prescription(&ctx, request(Some("BAD")))
        .await
        .expect_err("should fail");
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, PRESCRIPTION_NOT_FOUND);
}

#[tokio::test]
async fn seed_file_accepts_an_array() {
    let ctx = LookupContext {
        storage: Storage::new("sqlite::memory:").await.expect("db"),
    };
    let mut other = jane();
    other.code_id = CodeId::parse("XYZ789").expect("code");
    let path = std::env::temp_dir().join(format!("kiosk-seed-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_vec(&vec![jane(), other]).expect("json")).expect("write");

    let count = seed_from_file(&ctx, &path).await.expect("seed");
    std::fs::remove_file(&path).expect("cleanup");

    assert_eq!(count, 2);
    assert_eq!(ctx.storage.list_code_ids().await.expect("list").len(), 2);
}

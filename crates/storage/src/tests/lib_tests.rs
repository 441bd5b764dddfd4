use super::*;
use shared::domain::Medicine;

fn prescription(code: &str, tablets: u32) -> Prescription {
    Prescription {
        patient_name: "Jane Doe".to_string(),
        patient_age: 40,
        phone_number: "555-1111".to_string(),
        code_id: CodeId::parse(code).expect("code"),
        medicines: vec![Medicine {
            name: "Ibuprofen".to_string(),
            routine: vec!["morning".to_string()],
            timing: "after food".to_string(),
            no_of_tablets: tablets,
        }],
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn stores_and_finds_prescription_by_code() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .upsert_prescription(&prescription("ABC123", 3))
        .await
        .expect("store");

    let code = CodeId::parse("ABC123").expect("code");
    let found = storage
        .find_prescription(&code)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(found, prescription("ABC123", 3));

    let missing = CodeId::parse("NOPE").expect("code");
    assert!(storage.find_prescription(&missing).await.expect("find").is_none());
}

#[tokio::test]
async fn upsert_replaces_existing_document() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .upsert_prescription(&prescription("ABC123", 3))
        .await
        .expect("first");
    storage
        .upsert_prescription(&prescription("ABC123", 7))
        .await
        .expect("second");

    let code = CodeId::parse("ABC123").expect("code");
    let stored = storage
        .find_stored_prescription(&code)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(stored.prescription.medicines[0].no_of_tablets, 7);
    assert!(stored.updated_at >= stored.created_at);
    assert_eq!(storage.list_code_ids().await.expect("list").len(), 1);
}

#[tokio::test]
async fn refuses_prescription_with_zero_tablets() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let err = storage
        .upsert_prescription(&prescription("ABC123", 0))
        .await
        .expect_err("must refuse");
    assert!(err.to_string().contains("ABC123"));
}

#[tokio::test]
async fn lists_and_deletes_codes() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for code in ["B2", "A1"] {
        storage
            .upsert_prescription(&prescription(code, 1))
            .await
            .expect("store");
    }

    let codes: Vec<String> = storage
        .list_code_ids()
        .await
        .expect("list")
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(codes, vec!["A1".to_string(), "B2".to_string()]);

    let a1 = CodeId::parse("A1").expect("code");
    assert!(storage.delete_prescription(&a1).await.expect("delete"));
    assert!(!storage.delete_prescription(&a1).await.expect("delete again"));
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("pill_kiosk_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("storage.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

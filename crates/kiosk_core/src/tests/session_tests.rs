use super::*;
use shared::domain::{CodeId, Medicine};

fn jane() -> Prescription {
    Prescription {
        patient_name: "Jane Doe".into(),
        patient_age: 40,
        phone_number: "555-1111".into(),
        code_id: CodeId::parse("ABC123").unwrap(),
        medicines: vec![Medicine {
            name: "Ibuprofen".into(),
            routine: vec!["morning".into()],
            timing: "after food".into(),
            no_of_tablets: 3,
        }],
    }
}

#[test]
fn prescription_survives_the_string_store() {
    let mut session = SessionStore::new();
    session.store_prescription(&jane()).unwrap();

    let raw = session.get(PRESCRIPTION_KEY).unwrap();
    assert!(raw.contains("\"codeId\":\"ABC123\""));
    assert!(raw.contains("\"noOfTablets\":3"));
    assert_eq!(session.load_prescription().unwrap(), jane());
}

#[test]
fn missing_keys_are_reported_by_name() {
    let session = SessionStore::new();
    assert_eq!(
        session.load_prescription().unwrap_err(),
        SessionError::Missing {
            key: PRESCRIPTION_KEY
        }
    );
    assert_eq!(
        session.load_total_cost().unwrap_err(),
        SessionError::Missing {
            key: TOTAL_COST_KEY
        }
    );
}

#[test]
fn garbage_prescription_is_corrupt() {
    let mut session = SessionStore::new();
    session.set(PRESCRIPTION_KEY, "{not json");
    assert!(matches!(
        session.load_prescription(),
        Err(SessionError::Corrupt {
            key: PRESCRIPTION_KEY,
            ..
        })
    ));
}

#[test]
fn total_cost_is_a_json_encoded_string() {
    let mut session = SessionStore::new();
    session.store_total_cost(Decimal::from(15));
    assert_eq!(session.get(TOTAL_COST_KEY), Some("\"15\""));
    assert_eq!(session.load_total_cost().unwrap(), Decimal::from(15));
}

#[test]
fn total_cost_accepts_bare_numbers_and_rejects_junk() {
    let mut session = SessionStore::new();
    session.set(TOTAL_COST_KEY, "12.5");
    assert_eq!(session.load_total_cost().unwrap(), Decimal::new(125, 1));

    session.set(TOTAL_COST_KEY, "\"abc\"");
    assert!(matches!(
        session.load_total_cost(),
        Err(SessionError::Corrupt { .. })
    ));

    session.set(TOTAL_COST_KEY, "-5");
    assert!(matches!(
        session.load_total_cost(),
        Err(SessionError::Corrupt { .. })
    ));
}

#[test]
fn clear_starts_a_new_session() {
    let mut session = SessionStore::new();
    let first = session.id();
    session.store_total_cost(Decimal::from(5));

    session.clear();

    assert!(session.is_empty());
    assert_ne!(session.id(), first);
}

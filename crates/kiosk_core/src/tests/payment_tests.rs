use super::*;

fn valid_form() -> CardForm {
    CardForm {
        card_number: "4242 4242 4242 4242".into(),
        cardholder_name: "Jane Doe".into(),
        expiry: "12/29".into(),
        cvv: "123".into(),
    }
}

#[test]
fn accepts_well_formed_cards() {
    for (number, expiry, cvv) in [
        ("4242424242424242", "01/25", "123"),
        ("4242 4242 4242 4242", "12/99", "1234"),
        (" 1111 2222 3333 4444 ", "06/30", "000"),
        ("4242424242424242", "13/29", "123"),
        ("4242424242424242", "00/29", "123"),
    ] {
        let form = CardForm {
            card_number: number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Ok(()), "{number} {expiry} {cvv}");
    }
}

#[test]
fn rejects_malformed_card_numbers() {
    for number in [
        "",
        "4242",
        "42424242424242421",
        "4242-4242-4242-4242",
        "424242424242424a",
        "４２４２４２４２４２４２４２４２",
    ] {
        let form = CardForm {
            card_number: number.into(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(CardValidationError::CardNumber), "{number}");
    }
}

#[test]
fn rejects_malformed_expiry() {
    for expiry in ["", "1229", "1/29", "12/2029", "ab/cd", "12-29", "12/2", " 12/29"] {
        let form = CardForm {
            expiry: expiry.into(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(CardValidationError::Expiry), "{expiry}");
    }
}

#[test]
fn rejects_malformed_cvv() {
    for cvv in ["", "12", "12345", "12a", " 123"] {
        let form = CardForm {
            cvv: cvv.into(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(CardValidationError::Cvv), "{cvv}");
    }
}

#[test]
fn first_failure_in_form_order_wins() {
    let form = CardForm {
        card_number: "1".into(),
        cardholder_name: " ".into(),
        expiry: "x".into(),
        cvv: "".into(),
    };
    assert_eq!(form.validate(), Err(CardValidationError::CardNumber));

    let form = CardForm {
        cardholder_name: "  ".into(),
        expiry: "x".into(),
        ..valid_form()
    };
    let err = form.validate().unwrap_err();
    assert_eq!(err, CardValidationError::CardholderName);
    assert_eq!(err.title(), "Invalid Name");
    assert_eq!(err.to_string(), "Please enter the cardholder name.");
}

#[test]
fn debug_output_hides_card_data() {
    let rendered = format!("{:?}", valid_form());
    assert!(!rendered.contains("4242"));
    assert!(!rendered.contains("123"));
}

#[test]
fn simulator_follows_the_happy_path() {
    let mut payment = PaymentSimulator::new(Decimal::from(15));
    assert_eq!(payment.status(), PaymentStatus::Idle);

    payment.submit(&valid_form()).unwrap();
    assert_eq!(payment.status(), PaymentStatus::Processing);
    payment.settle().unwrap();
    assert_eq!(payment.status(), PaymentStatus::Success);
    assert_eq!(payment.amount(), Decimal::from(15));
}

#[test]
fn invalid_form_keeps_simulator_idle() {
    let mut payment = PaymentSimulator::new(Decimal::from(15));
    let err = payment
        .submit(&CardForm {
            cvv: "1".into(),
            ..valid_form()
        })
        .unwrap_err();
    assert_eq!(err, PaymentError::Card(CardValidationError::Cvv));
    assert_eq!(payment.status(), PaymentStatus::Idle);
}

#[test]
fn error_only_returns_to_idle() {
    let mut payment = PaymentSimulator::new(Decimal::from(15));
    assert!(payment.retry().is_err());
    assert!(payment.settle().is_err());

    payment.submit(&valid_form()).unwrap();
    assert!(payment.submit(&valid_form()).is_err());
    payment.decline().unwrap();
    assert_eq!(payment.status(), PaymentStatus::Error);
    assert!(payment.settle().is_err());

    payment.retry().unwrap();
    assert_eq!(payment.status(), PaymentStatus::Idle);
}

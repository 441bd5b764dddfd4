use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub card_number: String,
    pub cardholder_name: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

impl fmt::Debug for CardForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardForm")
            .field("card_number", &"<redacted>")
            .field("cardholder_name", &"<redacted>")
            .field("expiry", &"<redacted>")
            .field("cvv", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardValidationError {
    #[error("Please enter a valid 16-digit card number.")]
    CardNumber,
    #[error("Please enter the cardholder name.")]
    CardholderName,
    #[error("Please enter a valid expiry date (MM/YY).")]
    Expiry,
    #[error("Please enter a valid CVV code.")]
    Cvv,
}

impl CardValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CardNumber => "Invalid Card Number",
            Self::CardholderName => "Invalid Name",
            Self::Expiry => "Invalid Expiry Date",
            Self::Cvv => "Invalid CVV",
        }
    }
}

fn all_ascii_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

impl CardForm {
    /// Reports the first failing field in form order.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        let digits: String = self
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if digits.len() != 16 || !all_ascii_digits(&digits) {
            return Err(CardValidationError::CardNumber);
        }

        if self.cardholder_name.trim().is_empty() {
            return Err(CardValidationError::CardholderName);
        }

        let expiry_ok = match self.expiry.split_once('/') {
            Some((month, year)) => {
                month.len() == 2
                    && year.len() == 2
                    && all_ascii_digits(month)
                    && all_ascii_digits(year)
            }
            None => false,
        };
        if !expiry_ok {
            return Err(CardValidationError::Expiry);
        }

        if !(3..=4).contains(&self.cvv.len()) || !all_ascii_digits(&self.cvv) {
            return Err(CardValidationError::Cvv);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Idle,
    Processing,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("payment cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error(transparent)]
    Card(#[from] CardValidationError),
}

/// `Idle -> Processing -> Success | Error`, with `Error -> Idle` as the
/// only way back.
#[derive(Debug, Clone)]
pub struct PaymentSimulator {
    amount: Decimal,
    status: PaymentStatus,
}

impl PaymentSimulator {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            status: PaymentStatus::Idle,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    fn transition(&mut self, from: PaymentStatus, to: PaymentStatus) -> Result<(), PaymentError> {
        if self.status != from {
            return Err(PaymentError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn submit(&mut self, form: &CardForm) -> Result<(), PaymentError> {
        if self.status != PaymentStatus::Idle {
            return Err(PaymentError::InvalidTransition {
                from: self.status,
                to: PaymentStatus::Processing,
            });
        }
        form.validate()?;
        self.transition(PaymentStatus::Idle, PaymentStatus::Processing)
    }

    pub fn settle(&mut self) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Processing, PaymentStatus::Success)
    }

    /// Not reached by the simulated gateway; kept so the error screen has a
    /// way in.
    pub fn decline(&mut self) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Processing, PaymentStatus::Error)
    }

    pub fn retry(&mut self) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Error, PaymentStatus::Idle)
    }
}

#[cfg(test)]
#[path = "tests/payment_tests.rs"]
mod tests;

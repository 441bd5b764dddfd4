use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CodeId, InvalidPrescription, Prescription};

pub const LOOKUP_ROUTE: &str = "/get-prescription";

/// Shown when a failed lookup carries no server-provided reason.
pub const GENERIC_LOOKUP_FAILURE: &str = "Invalid code";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupRequest {
    #[serde(rename = "patientId", default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
}

impl LookupRequest {
    pub fn for_code(code_id: &CodeId) -> Self {
        Self {
            patient_id: Some(code_id.as_str().to_string()),
        }
    }
}

/// Body of every non-success lookup response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Reason to surface to the patient for a failed lookup.
    pub fn reason(&self) -> &str {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .unwrap_or(GENERIC_LOOKUP_FAILURE)
    }
}

#[derive(Debug, Error)]
pub enum PrescriptionShapeError {
    #[error("malformed prescription body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] InvalidPrescription),
}

/// Strict parse of a lookup success body. Anything that is not a well-formed
/// prescription is rejected rather than patched up.
pub fn parse_prescription(body: &[u8]) -> Result<Prescription, PrescriptionShapeError> {
    let prescription: Prescription = serde_json::from_slice(body)?;
    prescription.validate()?;
    Ok(prescription)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrescriptionBatch {
    Many(Vec<Prescription>),
    One(Box<Prescription>),
}

/// Seed documents hold either a single prescription or an array of them.
pub fn parse_prescription_batch(body: &[u8]) -> Result<Vec<Prescription>, PrescriptionShapeError> {
    let prescriptions = match serde_json::from_slice(body)? {
        PrescriptionBatch::Many(prescriptions) => prescriptions,
        PrescriptionBatch::One(prescription) => vec![*prescription],
    };
    for prescription in &prescriptions {
        prescription.validate()?;
    }
    Ok(prescriptions)
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier a patient types or scans to look up their prescription.
///
/// Always non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeId(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("code id must not be empty")]
pub struct EmptyCodeId;

impl CodeId {
    pub fn parse(raw: &str) -> Result<Self, EmptyCodeId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyCodeId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CodeId {
    type Error = EmptyCodeId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CodeId> for String {
    fn from(value: CodeId) -> Self {
        value.0
    }
}

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub name: String,
    /// Schedule tags such as `morning` or `evening`.
    #[serde(default)]
    pub routine: Vec<String>,
    /// Free text such as `after food`.
    #[serde(default)]
    pub timing: String,
    pub no_of_tablets: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub patient_name: String,
    pub patient_age: u32,
    pub phone_number: String,
    pub code_id: CodeId,
    /// Display order only.
    pub medicines: Vec<Medicine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPrescription {
    #[error("patientAge must be greater than zero")]
    NonPositiveAge,
    #[error("medicine '{name}' must have at least one tablet")]
    EmptyMedicine { name: String },
}

impl Prescription {
    pub fn validate(&self) -> Result<(), InvalidPrescription> {
        if self.patient_age == 0 {
            return Err(InvalidPrescription::NonPositiveAge);
        }
        if let Some(medicine) = self.medicines.iter().find(|m| m.no_of_tablets == 0) {
            return Err(InvalidPrescription::EmptyMedicine {
                name: medicine.name.clone(),
            });
        }
        Ok(())
    }

    pub fn total_pill_count(&self) -> u32 {
        self.medicines
            .iter()
            .fold(0u32, |acc, m| acc.saturating_add(m.no_of_tablets))
    }

    /// Working copy with the medicine list replaced; patient fields are kept as fetched.
    pub fn with_medicines(&self, medicines: Vec<Medicine>) -> Self {
        Self {
            patient_name: self.patient_name.clone(),
            patient_age: self.patient_age,
            phone_number: self.phone_number.clone(),
            code_id: self.code_id.clone(),
            medicines,
        }
    }
}

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::Deserialize;
use shared::domain::CodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentificationError {
    #[error("Please enter a code ID")]
    EmptyCode,
    #[error("scanned code is empty")]
    EmptyScan,
}

pub fn validate_manual_code(input: &str) -> Result<CodeId, IdentificationError> {
    CodeId::parse(input).map_err(|_| IdentificationError::EmptyCode)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarField {
    Text(String),
    Number(serde_json::Number),
}

impl ScalarField {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct QrPayload {
    #[serde(rename = "codeId", default)]
    code_id: Option<ScalarField>,
    #[serde(rename = "patientId", default)]
    patient_id: Option<ScalarField>,
}

/// Resolves a decoded QR payload to a code id.
///
/// A JSON object carrying `codeId` (preferred) or `patientId` yields that
/// field; anything else is taken as the code itself.
pub fn extract_code_id(raw: &str) -> Result<CodeId, IdentificationError> {
    if let Ok(payload) = serde_json::from_str::<QrPayload>(raw) {
        let field = [payload.code_id, payload.patient_id]
            .into_iter()
            .flatten()
            .find_map(|field| CodeId::parse(&field.into_text()).ok());
        if let Some(code) = field {
            return Ok(code);
        }
    }
    CodeId::parse(raw).map_err(|_| IdentificationError::EmptyScan)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    Decoded(String),
    NoCode,
    Fatal(String),
}

pub type DecodeStream = Pin<Box<dyn Stream<Item = DecodeEvent> + Send>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("Unable to access your camera. Please allow permission or enter code manually.")]
    PermissionDenied,
    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

/// Exclusive video access. Dropping the stream releases the camera.
#[async_trait]
pub trait CameraCapability: Send + Sync {
    async fn open(&self) -> Result<DecodeStream, CameraError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MissingCamera;

#[async_trait]
impl CameraCapability for MissingCamera {
    async fn open(&self) -> Result<DecodeStream, CameraError> {
        Err(CameraError::Unavailable("no camera is attached".into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerStatus {
    RequestingPermission,
    Armed,
    /// A code was accepted and is being looked up.
    Disarmed,
    PermissionDenied,
    Failed,
}

impl ScannerStatus {
    pub fn offers_manual_fallback(self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Accepted(CodeId),
    Dropped,
    Noise,
    Rejected(IdentificationError),
    Fatal(String),
}

/// Admits at most one decoded code per armed period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanGate {
    status: ScannerStatus,
}

impl Default for ScanGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanGate {
    pub fn new() -> Self {
        Self {
            status: ScannerStatus::RequestingPermission,
        }
    }

    pub fn status(&self) -> ScannerStatus {
        self.status
    }

    pub fn camera_opened(&mut self) {
        if self.status == ScannerStatus::RequestingPermission {
            self.status = ScannerStatus::Armed;
        }
    }

    /// Denied and unavailable cameras look the same to the patient.
    pub fn camera_failed(&mut self) {
        self.status = ScannerStatus::PermissionDenied;
    }

    pub fn offer(&mut self, event: DecodeEvent) -> ScanOutcome {
        match event {
            DecodeEvent::NoCode => ScanOutcome::Noise,
            DecodeEvent::Fatal(reason) => {
                if self.status.offers_manual_fallback() {
                    return ScanOutcome::Dropped;
                }
                self.status = ScannerStatus::Failed;
                ScanOutcome::Fatal(reason)
            }
            DecodeEvent::Decoded(raw) => {
                if self.status != ScannerStatus::Armed {
                    return ScanOutcome::Dropped;
                }
                match extract_code_id(&raw) {
                    Ok(code) => {
                        self.status = ScannerStatus::Disarmed;
                        ScanOutcome::Accepted(code)
                    }
                    Err(err) => ScanOutcome::Rejected(err),
                }
            }
        }
    }

    /// Returns false when the camera never came up; rearming cannot help then.
    pub fn rearm(&mut self) -> bool {
        match self.status {
            ScannerStatus::Armed | ScannerStatus::Disarmed => {
                self.status = ScannerStatus::Armed;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/identification_tests.rs"]
mod tests;

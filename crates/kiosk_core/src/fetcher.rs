use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{CodeId, Prescription},
    protocol::{parse_prescription, ErrorBody, LookupRequest, GENERIC_LOOKUP_FAILURE},
};
use thiserror::Error;
use url::Url;

use crate::config::KioskConfig;

const UNREACHABLE_SERVICE: &str = "Unable to reach the prescription service. Please try again.";
const UNREADABLE_PRESCRIPTION: &str = "Invalid prescription data received. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("lookup rejected with status {status}: {reason}")]
    NotFound { status: u16, reason: String },
    #[error("lookup failed: {detail}")]
    Network {
        detail: String,
        reason: Option<String>,
    },
    #[error("invalid lookup response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Text shown to the patient. Server-provided reasons are passed through.
    pub fn user_message(&self) -> &str {
        match self {
            Self::NotFound { reason, .. } => reason,
            Self::Network {
                reason: Some(reason),
                ..
            } => reason,
            Self::Network { reason: None, .. } => UNREACHABLE_SERVICE,
            Self::InvalidResponse(_) => UNREADABLE_PRESCRIPTION,
        }
    }
}

#[async_trait]
pub trait PrescriptionLookup: Send + Sync {
    async fn lookup(&self, code_id: &CodeId) -> Result<Prescription, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpPrescriptionLookup {
    http: Client,
    endpoint: Url,
}

impl HttpPrescriptionLookup {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn from_config(config: &KioskConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: config.lookup_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PrescriptionLookup for HttpPrescriptionLookup {
    async fn lookup(&self, code_id: &CodeId) -> Result<Prescription, FetchError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&LookupRequest::for_code(code_id))
            .send()
            .await
            .map_err(|err| FetchError::Network {
                detail: err.to_string(),
                reason: None,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| FetchError::Network {
            detail: err.to_string(),
            reason: None,
        })?;

        interpret_response(code_id, status, &body)
    }
}

fn interpret_response(
    requested: &CodeId,
    status: StatusCode,
    body: &[u8],
) -> Result<Prescription, FetchError> {
    if status.is_success() {
        let prescription = parse_prescription(body)
            .map_err(|err| FetchError::InvalidResponse(err.to_string()))?;
        if &prescription.code_id != requested {
            return Err(FetchError::InvalidResponse(format!(
                "asked for '{requested}' but received '{}'",
                prescription.code_id
            )));
        }
        return Ok(prescription);
    }

    // Any answered failure shows the server text, else the generic message.
    let reason = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|reason| reason.trim().to_string())
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| GENERIC_LOOKUP_FAILURE.to_string());

    if status.is_client_error() {
        Err(FetchError::NotFound {
            status: status.as_u16(),
            reason,
        })
    } else {
        Err(FetchError::Network {
            detail: format!("server answered {status}"),
            reason: Some(reason),
        })
    }
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;

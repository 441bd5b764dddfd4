use std::path::Path;

use anyhow::Context;
use shared::{
    domain::{CodeId, Prescription},
    error::ApiError,
    protocol::{parse_prescription_batch, LookupRequest},
};
use storage::Storage;
use tracing::{info, warn};

pub const PATIENT_ID_REQUIRED: &str = "Patient ID is required";
pub const PRESCRIPTION_NOT_FOUND: &str = "No prescription found for this patient ID";

#[derive(Clone)]
pub struct LookupContext {
    pub storage: Storage,
}

pub async fn get_prescription(
    ctx: &LookupContext,
    request: LookupRequest,
) -> Result<Prescription, ApiError> {
    let code_id = request
        .patient_id
        .as_deref()
        .and_then(|raw| CodeId::parse(raw).ok())
        .ok_or_else(|| ApiError::validation(PATIENT_ID_REQUIRED))?;

    match ctx.storage.find_prescription(&code_id).await {
        Ok(Some(prescription)) => {
            info!(code_id = %code_id, "lookup: prescription served");
            Ok(prescription)
        }
        Ok(None) => {
            info!(code_id = %code_id, "lookup: no prescription");
            Err(ApiError::not_found(PRESCRIPTION_NOT_FOUND))
        }
        Err(error) => {
            warn!(code_id = %code_id, %error, "lookup: storage failure");
            Err(ApiError::internal(error.to_string()))
        }
    }
}

pub async fn seed_from_file(ctx: &LookupContext, path: &Path) -> anyhow::Result<usize> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read seed file '{}'", path.display()))?;
    let prescriptions = parse_prescription_batch(&raw)
        .with_context(|| format!("invalid seed file '{}'", path.display()))?;
    for prescription in &prescriptions {
        ctx.storage.upsert_prescription(prescription).await?;
    }
    info!(count = prescriptions.len(), path = %path.display(), "seed: prescriptions loaded");
    Ok(prescriptions.len())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;

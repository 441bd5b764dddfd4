use std::{collections::HashMap, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{domain::Prescription, protocol::parse_prescription};
use thiserror::Error;
use uuid::Uuid;

pub const PRESCRIPTION_KEY: &str = "prescription";
pub const TOTAL_COST_KEY: &str = "totalCost";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session key '{key}' is missing")]
    Missing { key: &'static str },
    #[error("session key '{key}' could not be parsed: {reason}")]
    Corrupt { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    id: Uuid,
    started_at: DateTime<Utc>,
    entries: HashMap<String, String>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            entries: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and starts a new session identity.
    pub fn clear(&mut self) {
        let previous = self.id;
        *self = Self::new();
        tracing::debug!(%previous, session_id = %self.id, "session cleared");
    }

    pub fn store_prescription(&mut self, prescription: &Prescription) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(prescription).map_err(|err| SessionError::Corrupt {
            key: PRESCRIPTION_KEY,
            reason: err.to_string(),
        })?;
        self.set(PRESCRIPTION_KEY, encoded);
        Ok(())
    }

    pub fn load_prescription(&self) -> Result<Prescription, SessionError> {
        let raw = self.get(PRESCRIPTION_KEY).ok_or(SessionError::Missing {
            key: PRESCRIPTION_KEY,
        })?;
        parse_prescription(raw.as_bytes()).map_err(|err| SessionError::Corrupt {
            key: PRESCRIPTION_KEY,
            reason: err.to_string(),
        })
    }

    /// Stored as a JSON string, e.g. `"15"`.
    pub fn store_total_cost(&mut self, total_cost: Decimal) {
        self.set(
            TOTAL_COST_KEY,
            serde_json::Value::String(total_cost.to_string()).to_string(),
        );
    }

    /// Accepts the JSON string form as well as a bare number.
    pub fn load_total_cost(&self) -> Result<Decimal, SessionError> {
        let raw = self.get(TOTAL_COST_KEY).ok_or(SessionError::Missing {
            key: TOTAL_COST_KEY,
        })?;
        let corrupt = |reason: String| SessionError::Corrupt {
            key: TOTAL_COST_KEY,
            reason,
        };

        let text = match serde_json::from_str::<String>(raw) {
            Ok(inner) => inner,
            Err(_) => raw.trim().to_string(),
        };
        let cost = Decimal::from_str(text.trim()).map_err(|err| corrupt(err.to_string()))?;
        if cost.is_sign_negative() {
            return Err(corrupt(format!("negative total cost {cost}")));
        }
        Ok(cost)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

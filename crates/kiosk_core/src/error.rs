use thiserror::Error;

use crate::session::{SessionError, TOTAL_COST_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    Validation,
    Permission,
    Remote,
    /// A screen was reached without its data and the kiosk went home.
    Flow,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    category: NoticeCategory,
    title: String,
    message: String,
}

impl Notice {
    pub fn new(
        category: NoticeCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeCategory::Validation, title, message)
    }

    pub fn permission(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeCategory::Permission, title, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(NoticeCategory::Remote, "Error", message)
    }

    pub fn flow(violation: &FlowViolation) -> Self {
        Self::new(NoticeCategory::Flow, "Error", violation.to_string())
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeCategory::Info, title, message)
    }

    pub fn category(&self) -> NoticeCategory {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.category != NoticeCategory::Info
    }
}

/// A screen was entered without the session data it needs. Always answered by
/// returning to Idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowViolation {
    #[error("No prescription data found. Please scan a QR code or enter a code ID.")]
    MissingPrescription,
    #[error("Invalid prescription data. Please try again.")]
    CorruptPrescription,
    #[error("No payment information found. Please select your prescription first.")]
    MissingTotalCost,
    #[error("Invalid payment information. Please select your prescription first.")]
    CorruptTotalCost,
    #[error("There are no pills to dispense. Please start again.")]
    NothingToDispense,
}

impl From<SessionError> for FlowViolation {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::Missing { key } if key == TOTAL_COST_KEY => Self::MissingTotalCost,
            SessionError::Corrupt { key, .. } if key == TOTAL_COST_KEY => Self::CorruptTotalCost,
            SessionError::Missing { .. } => Self::MissingPrescription,
            SessionError::Corrupt { .. } => Self::CorruptPrescription,
        }
    }
}

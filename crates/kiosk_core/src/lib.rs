//! Screen-flow core of the pill dispensing kiosk.
//!
//! [`flow::FlowController`] is a synchronous state machine: every input is a
//! [`flow::FlowEvent`] and every output is a list of [`flow::Effect`]s.
//! [`runtime::KioskRuntime`] executes those effects (lookups, camera, timers)
//! on tokio and feeds their results back in as events.

pub mod completion;
pub mod config;
pub mod dispense;
pub mod editor;
pub mod error;
pub mod fetcher;
pub mod flow;
pub mod identification;
pub mod payment;
pub mod runtime;
pub mod session;
pub mod tasks;

pub use config::{load_config, load_config_from, FlowTimings, KioskConfig};
pub use error::{FlowViolation, Notice, NoticeCategory};
pub use fetcher::{FetchError, HttpPrescriptionLookup, PrescriptionLookup};
pub use flow::{
    Effect, FlowController, FlowEvent, FlowState, KioskSnapshot, MedicineLine, Screen, TimerKind,
    UserAction,
};
pub use identification::{
    CameraCapability, CameraError, DecodeEvent, DecodeStream, MissingCamera, ScannerStatus,
};
pub use payment::{CardForm, PaymentStatus};
pub use runtime::{KioskHandle, KioskRuntime, KioskUpdate};
pub use session::SessionStore;

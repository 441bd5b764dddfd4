//! The kiosk's screen-flow state machine.
//!
//! [`FlowController::dispatch`] is synchronous and never blocks: it consumes
//! one [`FlowEvent`], updates the current phase and returns the [`Effect`]s
//! the runtime must carry out. Asynchronous results come back as events
//! stamped with the generation they were started under; whenever the screen
//! changes the generation moves on and late results are dropped.

use std::{fmt, str::FromStr, time::Duration};

use rust_decimal::Decimal;
use shared::domain::{CodeId, Prescription};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::{
    completion::Countdown,
    config::FlowTimings,
    dispense::{DispenseProgress, PillDispensed},
    editor::{DecreaseOutcome, PrescriptionEditor},
    error::{FlowViolation, Notice},
    fetcher::FetchError,
    identification::{
        validate_manual_code, CameraError, DecodeEvent, ScanGate, ScanOutcome, ScannerStatus,
    },
    payment::{CardForm, PaymentError, PaymentSimulator, PaymentStatus},
    session::SessionStore,
};

const CAMERA_FALLBACK_MESSAGE: &str =
    "Unable to access your camera. Please allow permission or enter code manually.";
const SCANNER_FAILURE_MESSAGE: &str = "Failed to initialize scanner";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Idle,
    EnterCode,
    QrScan,
    Prescription,
    Payment,
    Dispensing,
    Complete,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Idle,
        Screen::EnterCode,
        Screen::QrScan,
        Screen::Prescription,
        Screen::Payment,
        Screen::Dispensing,
        Screen::Complete,
    ];

    pub fn route(self) -> &'static str {
        match self {
            Self::Idle => "/",
            Self::EnterCode => "/enter-code",
            Self::QrScan => "/scan-qr",
            Self::Prescription => "/prescription",
            Self::Payment => "/payment",
            Self::Dispensing => "/dispensing",
            Self::Complete => "/complete",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScreen(pub String);

impl fmt::Display for UnknownScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown screen '{}'", self.0)
    }
}

impl std::error::Error for UnknownScreen {}

impl FromStr for Screen {
    type Err = UnknownScreen;

    /// Accepts a route (`/scan-qr`) or its bare name (`scan-qr`, `idle`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("idle") || wanted.eq_ignore_ascii_case("home") {
            return Ok(Self::Idle);
        }
        Self::ALL
            .into_iter()
            .find(|screen| {
                let route = screen.route();
                wanted == route || (route.len() > 1 && wanted.eq_ignore_ascii_case(&route[1..]))
            })
            .ok_or_else(|| UnknownScreen(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Identifying,
    Fetching,
    Editing,
    Paying,
    Dispensing,
    Completing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    ChooseManualEntry,
    ChooseQrScan,
    /// Leave the scanner for manual entry.
    ShowManualFallback,
    /// Ask for the camera again after a denial or failure.
    RetryScanner,
    SubmitCode(String),
    ResetScanner,
    RemoveMedicine(usize),
    DecreaseMedicine(usize),
    ProceedToPayment,
    SubmitPayment(CardForm),
    RetryPayment,
    GoHome,
    /// Direct navigation, as if the address were typed in.
    Navigate(Screen),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    PaymentSettled,
    PaymentHandoff,
    DispenseTick,
    DispenseFinished,
    CountdownTick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    User(UserAction),
    CameraReady {
        generation: u64,
    },
    CameraFailed {
        generation: u64,
        error: CameraError,
    },
    Decode {
        generation: u64,
        event: DecodeEvent,
    },
    LookupFinished {
        generation: u64,
        code: CodeId,
        result: Result<Prescription, FetchError>,
    },
    Timer {
        generation: u64,
        timer: TimerKind,
    },
}

impl FlowEvent {
    fn generation(&self) -> Option<u64> {
        match self {
            Self::User(_) => None,
            Self::CameraReady { generation }
            | Self::CameraFailed { generation, .. }
            | Self::Decode { generation, .. }
            | Self::LookupFinished { generation, .. }
            | Self::Timer { generation, .. } => Some(*generation),
        }
    }
}

/// Work the runtime performs on behalf of the controller. Anything spawned
/// is stamped with [`FlowController::generation`] as of the end of the
/// dispatch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Abort everything the previous screen started. Always first.
    CancelScreenTasks,
    OpenCamera,
    FetchPrescription(CodeId),
    Schedule { after: Duration, timer: TimerKind },
    Notify(Notice),
    PillDispensed(PillDispensed),
}

#[derive(Debug, Clone)]
enum Identification {
    Manual,
    Camera(ScanGate),
}

impl Identification {
    fn screen(&self) -> Screen {
        match self {
            Self::Manual => Screen::EnterCode,
            Self::Camera(_) => Screen::QrScan,
        }
    }

    fn scanner(&self) -> Option<ScannerStatus> {
        match self {
            Self::Manual => None,
            Self::Camera(gate) => Some(gate.status()),
        }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Identifying(Identification),
    Fetching {
        code: CodeId,
        identification: Identification,
    },
    Editing(PrescriptionEditor),
    Paying(PaymentSimulator),
    Dispensing(DispenseProgress),
    Completing(Countdown),
}

impl Phase {
    fn state(&self) -> FlowState {
        match self {
            Self::Idle => FlowState::Idle,
            Self::Identifying(_) => FlowState::Identifying,
            Self::Fetching { .. } => FlowState::Fetching,
            Self::Editing(_) => FlowState::Editing,
            Self::Paying(_) => FlowState::Paying,
            Self::Dispensing(_) => FlowState::Dispensing,
            Self::Completing(_) => FlowState::Completing,
        }
    }

    fn screen(&self) -> Screen {
        match self {
            Self::Idle => Screen::Idle,
            Self::Identifying(identification) => identification.screen(),
            Self::Fetching { identification, .. } => identification.screen(),
            Self::Editing(_) => Screen::Prescription,
            Self::Paying(_) => Screen::Payment,
            Self::Dispensing(_) => Screen::Dispensing,
            Self::Completing(_) => Screen::Complete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineLine {
    pub name: String,
    pub routine: Vec<String>,
    pub timing: String,
    pub no_of_tablets: u32,
    pub can_decrease: bool,
}

/// Everything a renderer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskSnapshot {
    pub session_id: Uuid,
    pub state: FlowState,
    pub screen: Screen,
    pub scanner: Option<ScannerStatus>,
    pub pending_code: Option<CodeId>,
    pub prescription: Option<Prescription>,
    pub medicines: Vec<MedicineLine>,
    pub can_proceed: bool,
    pub total_cost: Option<Decimal>,
    pub payment: Option<PaymentStatus>,
    pub dispense: Option<DispenseProgress>,
    pub countdown: Option<u32>,
    pub notices: Vec<Notice>,
}

#[derive(Debug)]
pub struct FlowController {
    phase: Phase,
    session: SessionStore,
    generation: u64,
    timings: FlowTimings,
    notices: Vec<Notice>,
    restart: bool,
}

impl FlowController {
    pub fn new(timings: FlowTimings) -> Self {
        Self {
            phase: Phase::Idle,
            session: SessionStore::new(),
            generation: 0,
            timings,
            notices: Vec::new(),
            restart: false,
        }
    }

    pub fn state(&self) -> FlowState {
        self.phase.state()
    }

    pub fn screen(&self) -> Screen {
        self.phase.screen()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timings(&self) -> &FlowTimings {
        &self.timings
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Raw access to stored keys, bypassing the flow.
    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn dispatch(&mut self, event: FlowEvent) -> Vec<Effect> {
        if let Some(generation) = event.generation() {
            if generation != self.generation {
                trace!(
                    generation,
                    current = self.generation,
                    "flow: dropping event from a previous screen"
                );
                return Vec::new();
            }
        }
        if matches!(
            event,
            FlowEvent::User(_) | FlowEvent::LookupFinished { .. }
        ) {
            self.notices.clear();
        }

        let before = self.screen();
        let mut effects = Vec::new();

        match event {
            FlowEvent::User(action) => self.on_user(action, &mut effects),
            FlowEvent::CameraReady { .. } => self.on_camera_ready(),
            FlowEvent::CameraFailed { error, .. } => self.on_camera_failed(error, &mut effects),
            FlowEvent::Decode { event, .. } => self.on_decode(event, &mut effects),
            FlowEvent::LookupFinished { code, result, .. } => {
                self.on_lookup(code, result, &mut effects)
            }
            FlowEvent::Timer { timer, .. } => self.on_timer(timer, &mut effects),
        }

        let after = self.screen();
        if after != before || self.restart {
            self.restart = false;
            self.generation += 1;
            effects.insert(0, Effect::CancelScreenTasks);
            debug!(
                session_id = %self.session.id(),
                from = %before,
                to = %after,
                generation = self.generation,
                "flow: screen transition"
            );
        }
        effects
    }

    fn on_user(&mut self, action: UserAction, effects: &mut Vec<Effect>) {
        let action = match action {
            UserAction::Navigate(screen) => {
                debug!(screen = %screen, "flow: direct navigation");
                self.restart = true;
                return self.enter(screen, effects);
            }
            UserAction::GoHome => {
                if self.home_locked() {
                    debug!(screen = %self.screen(), "flow: home refused on this screen");
                } else {
                    self.go_idle(None, effects);
                }
                return;
            }
            other => other,
        };

        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        self.phase = match (phase, action) {
            (Phase::Idle, UserAction::ChooseManualEntry) => {
                Phase::Identifying(Identification::Manual)
            }
            (Phase::Idle, UserAction::ChooseQrScan) => {
                effects.push(Effect::OpenCamera);
                Phase::Identifying(Identification::Camera(ScanGate::new()))
            }

            (Phase::Identifying(Identification::Manual), UserAction::SubmitCode(input)) => {
                match validate_manual_code(&input) {
                    Ok(code) => {
                        effects.push(Effect::FetchPrescription(code.clone()));
                        Phase::Fetching {
                            code,
                            identification: Identification::Manual,
                        }
                    }
                    Err(err) => {
                        self.notify(Notice::validation("Error", err.to_string()), effects);
                        Phase::Identifying(Identification::Manual)
                    }
                }
            }
            (Phase::Identifying(Identification::Camera(_)), UserAction::ShowManualFallback) => {
                Phase::Identifying(Identification::Manual)
            }
            (Phase::Identifying(Identification::Camera(gate)), UserAction::RetryScanner) => {
                if gate.status().offers_manual_fallback() {
                    self.restart = true;
                    effects.push(Effect::OpenCamera);
                    Phase::Identifying(Identification::Camera(ScanGate::new()))
                } else {
                    Phase::Identifying(Identification::Camera(gate))
                }
            }
            (Phase::Identifying(Identification::Camera(mut gate)), UserAction::ResetScanner) => {
                if gate.rearm() {
                    self.notify(Notice::info("Scanner Reset", "Try scanning again"), effects);
                }
                Phase::Identifying(Identification::Camera(gate))
            }

            (Phase::Editing(mut editor), UserAction::RemoveMedicine(index)) => {
                match editor.remove(index) {
                    Ok(removed) => debug!(medicine = %removed.name, "flow: medicine removed"),
                    Err(err) => self.notify(Notice::validation("Error", err.to_string()), effects),
                }
                Phase::Editing(editor)
            }
            (Phase::Editing(mut editor), UserAction::DecreaseMedicine(index)) => {
                match editor.decrease(index) {
                    Ok(DecreaseOutcome::Decreased { remaining }) => {
                        debug!(index, remaining, "flow: medicine decreased")
                    }
                    Ok(DecreaseOutcome::Removed) => {
                        debug!(index, "flow: medicine removed at one tablet")
                    }
                    Err(err) => self.notify(Notice::validation("Error", err.to_string()), effects),
                }
                Phase::Editing(editor)
            }
            (Phase::Editing(editor), UserAction::ProceedToPayment) => match editor.finish() {
                Ok(order) => {
                    if let Err(err) = self.session.store_prescription(&order.prescription) {
                        return self.go_idle(Some(err.into()), effects);
                    }
                    self.session.store_total_cost(order.total_cost);
                    return self.enter(Screen::Payment, effects);
                }
                Err(err) => {
                    self.notify(Notice::validation("Error", err.to_string()), effects);
                    Phase::Editing(editor)
                }
            },

            (Phase::Paying(mut payment), UserAction::SubmitPayment(form)) => {
                match payment.submit(&form) {
                    Ok(()) => {
                        debug!(amount = %payment.amount(), "flow: payment processing");
                        effects.push(Effect::Schedule {
                            after: self.timings.payment_processing,
                            timer: TimerKind::PaymentSettled,
                        });
                    }
                    Err(PaymentError::Card(err)) => {
                        self.notify(Notice::validation(err.title(), err.to_string()), effects)
                    }
                    Err(err) => debug!(error = %err, "flow: payment submit ignored"),
                }
                Phase::Paying(payment)
            }
            (Phase::Paying(mut payment), UserAction::RetryPayment) => {
                if let Err(err) = payment.retry() {
                    debug!(error = %err, "flow: payment retry ignored");
                }
                Phase::Paying(payment)
            }

            (phase, action) => {
                debug!(
                    state = ?phase.state(),
                    action = action_name(&action),
                    "flow: action not available here"
                );
                phase
            }
        };
    }

    fn on_camera_ready(&mut self) {
        if let Some(gate) = self.scan_gate_mut() {
            gate.camera_opened();
            debug!("flow: camera ready, scanner armed");
        }
    }

    fn on_camera_failed(&mut self, error: CameraError, effects: &mut Vec<Effect>) {
        let Some(gate) = self.scan_gate_mut() else {
            return;
        };
        gate.camera_failed();
        warn!(error = %error, "flow: camera unavailable, offering manual entry");
        self.notify(
            Notice::permission("Camera Unavailable", CAMERA_FALLBACK_MESSAGE),
            effects,
        );
    }

    fn on_decode(&mut self, event: DecodeEvent, effects: &mut Vec<Effect>) {
        let fetching = matches!(self.phase, Phase::Fetching { .. });
        let Some(gate) = self.scan_gate_mut() else {
            return;
        };
        match gate.offer(event) {
            ScanOutcome::Noise => trace!("flow: no code in frame"),
            ScanOutcome::Dropped => trace!(fetching, "flow: decode dropped, scanner disarmed"),
            ScanOutcome::Rejected(err) => debug!(error = %err, "flow: decode rejected"),
            ScanOutcome::Fatal(reason) => {
                let message = if reason.trim().is_empty() {
                    SCANNER_FAILURE_MESSAGE.to_string()
                } else {
                    reason
                };
                self.notify(Notice::permission("Scanner Error", message), effects);
            }
            ScanOutcome::Accepted(code) => match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::Identifying(identification) => {
                    info!(code_id = %code, "flow: qr code accepted");
                    self.notify(Notice::info("QR Code Detected", "Processing code..."), effects);
                    effects.push(Effect::FetchPrescription(code.clone()));
                    self.phase = Phase::Fetching {
                        code,
                        identification,
                    };
                }
                other => self.phase = other,
            },
        }
    }

    fn on_lookup(
        &mut self,
        code: CodeId,
        result: Result<Prescription, FetchError>,
        effects: &mut Vec<Effect>,
    ) {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Fetching {
            code: pending,
            identification,
        } = phase
        else {
            self.phase = phase;
            return;
        };
        if pending != code {
            debug!(code_id = %code, pending = %pending, "flow: ignoring lookup for another code");
            self.phase = Phase::Fetching {
                code: pending,
                identification,
            };
            return;
        }

        match result {
            Ok(prescription) => {
                info!(
                    session_id = %self.session.id(),
                    code_id = %code,
                    medicines = prescription.medicines.len(),
                    "flow: prescription fetched"
                );
                if let Err(err) = self.session.store_prescription(&prescription) {
                    return self.go_idle(Some(err.into()), effects);
                }
                self.enter(Screen::Prescription, effects);
            }
            Err(err) => {
                info!(code_id = %code, error = %err, "flow: prescription lookup failed");
                let identification = match identification {
                    Identification::Camera(mut gate) => {
                        gate.rearm();
                        Identification::Camera(gate)
                    }
                    manual => manual,
                };
                self.phase = Phase::Identifying(identification);
                self.notify(Notice::remote(err.user_message()), effects);
            }
        }
    }

    fn on_timer(&mut self, timer: TimerKind, effects: &mut Vec<Effect>) {
        match (&mut self.phase, timer) {
            (Phase::Paying(payment), TimerKind::PaymentSettled) => {
                if payment.settle().is_ok() {
                    debug!("flow: payment settled");
                    effects.push(Effect::Schedule {
                        after: self.timings.payment_handoff,
                        timer: TimerKind::PaymentHandoff,
                    });
                }
            }
            (Phase::Paying(payment), TimerKind::PaymentHandoff) => {
                if payment.status() == PaymentStatus::Success {
                    self.enter(Screen::Dispensing, effects);
                }
            }
            (Phase::Dispensing(progress), TimerKind::DispenseTick) => {
                if let Some(pill) = progress.tick() {
                    trace!(sequence = pill.sequence, total = pill.total, "flow: pill dispensed");
                    effects.push(Effect::PillDispensed(pill));
                }
                let next = if progress.is_complete() {
                    Effect::Schedule {
                        after: self.timings.dispense_finish,
                        timer: TimerKind::DispenseFinished,
                    }
                } else {
                    Effect::Schedule {
                        after: self.timings.dispense_tick,
                        timer: TimerKind::DispenseTick,
                    }
                };
                effects.push(next);
            }
            (Phase::Dispensing(progress), TimerKind::DispenseFinished) => {
                if progress.is_complete() {
                    self.enter(Screen::Complete, effects);
                }
            }
            (Phase::Completing(countdown), TimerKind::CountdownTick) => {
                if countdown.tick() {
                    self.go_idle(None, effects);
                } else {
                    effects.push(Effect::Schedule {
                        after: self.timings.countdown_step,
                        timer: TimerKind::CountdownTick,
                    });
                }
            }
            (phase, timer) => {
                debug!(state = ?phase.state(), ?timer, "flow: timer not for this screen")
            }
        }
    }

    /// Enters `screen`, checking the session data it depends on.
    fn enter(&mut self, screen: Screen, effects: &mut Vec<Effect>) {
        match screen {
            Screen::Idle => self.go_idle(None, effects),
            Screen::EnterCode => self.phase = Phase::Identifying(Identification::Manual),
            Screen::QrScan => {
                effects.push(Effect::OpenCamera);
                self.phase = Phase::Identifying(Identification::Camera(ScanGate::new()));
            }
            Screen::Prescription => match self.session.load_prescription() {
                Ok(prescription) => {
                    self.phase = Phase::Editing(PrescriptionEditor::new(prescription))
                }
                Err(err) => self.go_idle(Some(err.into()), effects),
            },
            Screen::Payment => match self.session.load_total_cost() {
                Ok(amount) => self.phase = Phase::Paying(PaymentSimulator::new(amount)),
                Err(err) => self.go_idle(Some(err.into()), effects),
            },
            Screen::Dispensing => {
                let progress = self
                    .session
                    .load_prescription()
                    .map_err(FlowViolation::from)
                    .and_then(|prescription| DispenseProgress::start(&prescription));
                match progress {
                    Ok(progress) => {
                        debug!(total = progress.total(), "flow: dispense started");
                        effects.push(Effect::Schedule {
                            after: self.timings.dispense_tick,
                            timer: TimerKind::DispenseTick,
                        });
                        self.phase = Phase::Dispensing(progress);
                    }
                    Err(violation) => self.go_idle(Some(violation), effects),
                }
            }
            Screen::Complete => {
                effects.push(Effect::Schedule {
                    after: self.timings.countdown_step,
                    timer: TimerKind::CountdownTick,
                });
                self.phase = Phase::Completing(Countdown::new(self.timings.countdown_start));
            }
        }
    }

    /// The only recovery path. Always starts a fresh session.
    fn go_idle(&mut self, violation: Option<FlowViolation>, effects: &mut Vec<Effect>) {
        if let Some(violation) = violation {
            warn!(
                session_id = %self.session.id(),
                screen = %self.screen(),
                %violation,
                "flow: redirecting to idle"
            );
            self.notify(Notice::flow(&violation), effects);
        }
        self.phase = Phase::Idle;
        self.session.clear();
        self.restart = true;
    }

    fn home_locked(&self) -> bool {
        match &self.phase {
            Phase::Paying(payment) => matches!(
                payment.status(),
                PaymentStatus::Processing | PaymentStatus::Success
            ),
            Phase::Dispensing(_) | Phase::Completing(_) => true,
            _ => false,
        }
    }

    fn scan_gate_mut(&mut self) -> Option<&mut ScanGate> {
        match &mut self.phase {
            Phase::Identifying(Identification::Camera(gate))
            | Phase::Fetching {
                identification: Identification::Camera(gate),
                ..
            } => Some(gate),
            _ => None,
        }
    }

    fn notify(&mut self, notice: Notice, effects: &mut Vec<Effect>) {
        if notice.is_error() {
            warn!(
                category = ?notice.category(),
                title = notice.title(),
                message = notice.message(),
                "flow: notice"
            );
        }
        self.notices.push(notice.clone());
        effects.push(Effect::Notify(notice));
    }

    pub fn snapshot(&self) -> KioskSnapshot {
        let mut snapshot = KioskSnapshot {
            session_id: self.session.id(),
            state: self.state(),
            screen: self.screen(),
            scanner: None,
            pending_code: None,
            prescription: None,
            medicines: Vec::new(),
            can_proceed: false,
            total_cost: None,
            payment: None,
            dispense: None,
            countdown: None,
            notices: self.notices.clone(),
        };

        match &self.phase {
            Phase::Idle => {}
            Phase::Identifying(identification) => snapshot.scanner = identification.scanner(),
            Phase::Fetching {
                code,
                identification,
            } => {
                snapshot.scanner = identification.scanner();
                snapshot.pending_code = Some(code.clone());
            }
            Phase::Editing(editor) => {
                snapshot.prescription =
                    Some(editor.fetched().with_medicines(editor.medicines().to_vec()));
                snapshot.medicines = editor
                    .medicines()
                    .iter()
                    .enumerate()
                    .map(|(index, m)| MedicineLine {
                        name: m.name.clone(),
                        routine: m.routine.clone(),
                        timing: m.timing.clone(),
                        no_of_tablets: m.no_of_tablets,
                        can_decrease: editor.can_decrease(index),
                    })
                    .collect();
                snapshot.can_proceed = editor.can_proceed();
                snapshot.total_cost = Some(editor.current_total());
            }
            Phase::Paying(payment) => {
                snapshot.total_cost = Some(payment.amount());
                snapshot.payment = Some(payment.status());
            }
            Phase::Dispensing(progress) => snapshot.dispense = Some(*progress),
            Phase::Completing(countdown) => snapshot.countdown = Some(countdown.remaining()),
        }
        snapshot
    }
}

fn action_name(action: &UserAction) -> &'static str {
    match action {
        UserAction::ChooseManualEntry => "choose_manual_entry",
        UserAction::ChooseQrScan => "choose_qr_scan",
        UserAction::ShowManualFallback => "show_manual_fallback",
        UserAction::RetryScanner => "retry_scanner",
        UserAction::SubmitCode(_) => "submit_code",
        UserAction::ResetScanner => "reset_scanner",
        UserAction::RemoveMedicine(_) => "remove_medicine",
        UserAction::DecreaseMedicine(_) => "decrease_medicine",
        UserAction::ProceedToPayment => "proceed_to_payment",
        UserAction::SubmitPayment(_) => "submit_payment",
        UserAction::RetryPayment => "retry_payment",
        UserAction::GoHome => "go_home",
        UserAction::Navigate(_) => "navigate",
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;

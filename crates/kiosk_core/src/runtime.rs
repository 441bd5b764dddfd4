//! Drives a [`FlowController`] on tokio.
//!
//! User actions arrive over an mpsc channel from a [`KioskHandle`]; camera
//! frames, lookup results and timers are spawned as screen tasks that post
//! back into the loop. Renderers follow along through a broadcast channel.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::{
    config::FlowTimings,
    dispense::PillDispensed,
    error::Notice,
    fetcher::PrescriptionLookup,
    flow::{Effect, FlowController, FlowEvent, KioskSnapshot, UserAction},
    identification::CameraCapability,
    tasks::ScreenTasks,
};

const ACTION_BUFFER: usize = 32;
const UPDATE_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskUpdate {
    Snapshot(Box<KioskSnapshot>),
    /// Sent for every notice, even when an identical one is already on screen.
    Notice(Notice),
    PillDispensed(PillDispensed),
}

#[derive(Clone)]
pub struct KioskHandle {
    actions: mpsc::Sender<UserAction>,
    updates: broadcast::Sender<KioskUpdate>,
}

impl KioskHandle {
    pub async fn send(&self, action: UserAction) -> anyhow::Result<()> {
        self.actions
            .send(action)
            .await
            .map_err(|_| anyhow::anyhow!("kiosk runtime has stopped"))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KioskUpdate> {
        self.updates.subscribe()
    }
}

pub struct KioskRuntime {
    controller: FlowController,
    lookup: Arc<dyn PrescriptionLookup>,
    camera: Arc<dyn CameraCapability>,
    actions: mpsc::Receiver<UserAction>,
    events_tx: mpsc::UnboundedSender<FlowEvent>,
    events_rx: mpsc::UnboundedReceiver<FlowEvent>,
    tasks: ScreenTasks,
    updates: broadcast::Sender<KioskUpdate>,
    last_snapshot: Option<KioskSnapshot>,
}

impl KioskRuntime {
    pub fn new(
        timings: FlowTimings,
        lookup: Arc<dyn PrescriptionLookup>,
        camera: Arc<dyn CameraCapability>,
    ) -> (Self, KioskHandle) {
        let (actions_tx, actions) = mpsc::channel(ACTION_BUFFER);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        let handle = KioskHandle {
            actions: actions_tx,
            updates: updates.clone(),
        };
        let runtime = Self {
            controller: FlowController::new(timings),
            lookup,
            camera,
            actions,
            events_tx,
            events_rx,
            tasks: ScreenTasks::new(),
            updates,
            last_snapshot: None,
        };
        (runtime, handle)
    }

    pub fn controller(&self) -> &FlowController {
        &self.controller
    }

    /// Runs until every [`KioskHandle`] has been dropped.
    pub async fn run(mut self) {
        info!(session_id = %self.controller.session().id(), "kiosk: runtime started");
        self.publish_snapshot();

        loop {
            tokio::select! {
                action = self.actions.recv() => match action {
                    Some(action) => self.handle_event(FlowEvent::User(action)),
                    None => break,
                },
                Some(event) = self.events_rx.recv() => self.handle_event(event),
            }
        }

        let cancelled = self.tasks.cancel_all();
        info!(cancelled, "kiosk: runtime stopped");
    }

    pub fn handle_event(&mut self, event: FlowEvent) {
        let effects = self.controller.dispatch(event);
        let generation = self.controller.generation();
        for effect in effects {
            self.execute(effect, generation);
        }
        self.publish_snapshot();
    }

    fn execute(&mut self, effect: Effect, generation: u64) {
        match effect {
            Effect::CancelScreenTasks => {
                let cancelled = self.tasks.cancel_all();
                debug!(cancelled, generation, "kiosk: screen tasks cancelled");
            }
            Effect::OpenCamera => {
                let camera = Arc::clone(&self.camera);
                let events = self.events_tx.clone();
                self.tasks.track(tokio::spawn(async move {
                    let mut frames = match camera.open().await {
                        Ok(frames) => frames,
                        Err(error) => {
                            let _ = events.send(FlowEvent::CameraFailed { generation, error });
                            return;
                        }
                    };
                    if events.send(FlowEvent::CameraReady { generation }).is_err() {
                        return;
                    }
                    while let Some(event) = frames.next().await {
                        if events.send(FlowEvent::Decode { generation, event }).is_err() {
                            return;
                        }
                    }
                    debug!(generation, "kiosk: camera stream ended");
                }));
            }
            Effect::FetchPrescription(code) => {
                let lookup = Arc::clone(&self.lookup);
                let events = self.events_tx.clone();
                self.tasks.track(tokio::spawn(async move {
                    let result = lookup.lookup(&code).await;
                    let _ = events.send(FlowEvent::LookupFinished {
                        generation,
                        code,
                        result,
                    });
                }));
            }
            Effect::Schedule { after, timer } => {
                let events = self.events_tx.clone();
                self.tasks.track(tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = events.send(FlowEvent::Timer { generation, timer });
                }));
            }
            Effect::Notify(notice) => {
                let _ = self.updates.send(KioskUpdate::Notice(notice));
            }
            Effect::PillDispensed(pill) => {
                let _ = self.updates.send(KioskUpdate::PillDispensed(pill));
            }
        }
    }

    /// Broadcasts the current snapshot if it differs from the last one sent.
    fn publish_snapshot(&mut self) {
        let snapshot = self.controller.snapshot();
        if self.last_snapshot.as_ref() == Some(&snapshot) {
            return;
        }
        self.last_snapshot = Some(snapshot.clone());
        let _ = self.updates.send(KioskUpdate::Snapshot(Box::new(snapshot)));
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;

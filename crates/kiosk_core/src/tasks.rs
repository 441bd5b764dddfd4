use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct ScreenTasks {
    handles: Vec<JoinHandle<()>>,
}

impl ScreenTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Aborts everything still running and returns how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        for handle in self.handles.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        cancelled
    }

    pub fn active(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for ScreenTasks {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

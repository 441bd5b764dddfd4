/// Seconds shown on the completion screen before the kiosk resets.
pub const COUNTDOWN_START: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(start: u32) -> Self {
        Self { remaining: start }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns true once the countdown has reached zero.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

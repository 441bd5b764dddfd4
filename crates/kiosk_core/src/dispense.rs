use shared::domain::Prescription;

use crate::error::FlowViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PillDispensed {
    /// 1-based.
    pub sequence: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispenseProgress {
    total: u32,
    dispensed: u32,
}

impl DispenseProgress {
    pub fn start(prescription: &Prescription) -> Result<Self, FlowViolation> {
        Self::for_pill_count(prescription.total_pill_count())
    }

    pub fn for_pill_count(total: u32) -> Result<Self, FlowViolation> {
        if total == 0 {
            return Err(FlowViolation::NothingToDispense);
        }
        Ok(Self {
            total,
            dispensed: 0,
        })
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn dispensed(&self) -> u32 {
        self.dispensed
    }

    /// Drops one pill; `None` once the run is complete.
    pub fn tick(&mut self) -> Option<PillDispensed> {
        if self.is_complete() {
            return None;
        }
        self.dispensed += 1;
        Some(PillDispensed {
            sequence: self.dispensed,
            total: self.total,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.dispensed == self.total
    }

    pub fn percent_complete(&self) -> u8 {
        let percent = u64::from(self.dispensed) * 100 / u64::from(self.total);
        percent as u8
    }
}

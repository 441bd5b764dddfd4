use rust_decimal::Decimal;
use shared::domain::{Medicine, Prescription};
use thiserror::Error;

pub const UNIT_PRICE: u32 = 5;

pub fn total_cost(medicines: &[Medicine]) -> Decimal {
    medicines
        .iter()
        .map(|m| Decimal::from(m.no_of_tablets) * Decimal::from(UNIT_PRICE))
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no medicine at position {index}")]
    NoSuchItem { index: usize },
    #[error("No medicines selected")]
    EmptyOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecreaseOutcome {
    Decreased { remaining: u32 },
    /// The item was at one tablet and has been dropped.
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedOrder {
    pub prescription: Prescription,
    pub total_cost: Decimal,
}

#[derive(Debug, Clone)]
pub struct PrescriptionEditor {
    fetched: Prescription,
    medicines: Vec<Medicine>,
}

impl PrescriptionEditor {
    pub fn new(fetched: Prescription) -> Self {
        let medicines = fetched.medicines.clone();
        Self { fetched, medicines }
    }

    pub fn fetched(&self) -> &Prescription {
        &self.fetched
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn can_decrease(&self, index: usize) -> bool {
        self.medicines
            .get(index)
            .is_some_and(|m| m.no_of_tablets > 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<Medicine, EditError> {
        if index >= self.medicines.len() {
            return Err(EditError::NoSuchItem { index });
        }
        Ok(self.medicines.remove(index))
    }

    pub fn decrease(&mut self, index: usize) -> Result<DecreaseOutcome, EditError> {
        let medicine = self
            .medicines
            .get_mut(index)
            .ok_or(EditError::NoSuchItem { index })?;
        if medicine.no_of_tablets <= 1 {
            self.medicines.remove(index);
            return Ok(DecreaseOutcome::Removed);
        }
        medicine.no_of_tablets -= 1;
        Ok(DecreaseOutcome::Decreased {
            remaining: medicine.no_of_tablets,
        })
    }

    pub fn can_proceed(&self) -> bool {
        !self.medicines.is_empty()
    }

    pub fn current_total(&self) -> Decimal {
        total_cost(&self.medicines)
    }

    pub fn finish(&self) -> Result<EditedOrder, EditError> {
        if !self.can_proceed() {
            return Err(EditError::EmptyOrder);
        }
        Ok(EditedOrder {
            prescription: self.fetched.with_medicines(self.medicines.clone()),
            total_cost: self.current_total(),
        })
    }
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;

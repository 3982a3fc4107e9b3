use boxoffice_core::{HoldId, SeatHold};
use std::collections::HashMap;

/// Active seat holds keyed by id. Presence in the store means "still active".
#[derive(Debug, Default)]
pub struct HoldStore {
    holds: HashMap<HoldId, SeatHold>,
}

impl HoldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, hold: SeatHold) {
        self.holds.insert(hold.id().clone(), hold);
    }

    pub fn get(&self, id: &HoldId) -> Option<&SeatHold> {
        self.holds.get(id)
    }

    pub fn remove(&mut self, id: &HoldId) -> Option<SeatHold> {
        self.holds.remove(id)
    }

    /// Every active hold. The borrow keeps the store frozen while iterating.
    pub fn entries(&self) -> impl Iterator<Item = (&HoldId, &SeatHold)> + '_ {
        self.holds.iter()
    }

    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    /// Total seats tied up in active holds.
    pub fn held_seats(&self) -> u32 {
        self.holds.values().map(SeatHold::num_seats).sum()
    }
}

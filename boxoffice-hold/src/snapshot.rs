use serde::Serialize;

/// Consistent view of a venue's seat accounting, read under one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilitySnapshot {
    pub max_seats: u32,
    pub available: u32,
    pub reserved: u32,
    pub held: u32,
    pub active_holds: usize,
}

impl AvailabilitySnapshot {
    /// `available + reserved + held == max_seats`
    pub fn is_balanced(&self) -> bool {
        u64::from(self.available) + u64::from(self.reserved) + u64::from(self.held)
            == u64::from(self.max_seats)
    }

    /// Fraction of the venue that is held or reserved.
    pub fn utilization(&self) -> f64 {
        if self.max_seats == 0 {
            0.0
        } else {
            1.0 - (self.available as f64 / self.max_seats as f64)
        }
    }
}

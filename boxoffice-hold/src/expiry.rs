use boxoffice_core::HoldId;
use boxoffice_inventory::AvailabilityCounter;
use boxoffice_store::HoldStore;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// Outcome of checking a single hold against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldStatus {
    Valid,
    Expired,
    NotFound,
}

/// What a sweep gave back to the available pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub holds: usize,
    pub seats: u32,
}

/// Reclaims seats from holds whose deadline has passed.
///
/// Borrows the store and the counter together so that an eviction and the
/// matching release always happen as one step. Expiry only compares `now`
/// with the deadline stored on the hold, so sweeping is idempotent: a hold
/// leaves the store the first time it is seen expired and is never released
/// twice.
pub struct ExpirationSweeper<'a> {
    holds: &'a mut HoldStore,
    counter: &'a mut AvailabilityCounter,
}

impl<'a> ExpirationSweeper<'a> {
    pub fn new(holds: &'a mut HoldStore, counter: &'a mut AvailabilityCounter) -> Self {
        Self { holds, counter }
    }

    /// Evict every hold with `expires_at <= now`.
    pub fn sweep_all(&mut self, now: Instant) -> SweepReport {
        let expired: Vec<HoldId> = self
            .holds
            .entries()
            .filter(|(_, hold)| hold.is_expired(now))
            .map(|(id, _)| id.clone())
            .collect();

        let mut report = SweepReport::default();
        for id in expired {
            if let Some(seats) = self.expire(&id, now) {
                report.holds += 1;
                report.seats += seats;
            }
        }
        report
    }

    /// Check one hold, evicting it if its deadline has passed.
    pub fn check_one(&mut self, id: &HoldId, now: Instant) -> HoldStatus {
        match self.holds.get(id) {
            None => HoldStatus::NotFound,
            Some(hold) if hold.is_expired(now) => {
                self.expire(id, now);
                HoldStatus::Expired
            }
            Some(_) => HoldStatus::Valid,
        }
    }

    fn expire(&mut self, id: &HoldId, now: Instant) -> Option<u32> {
        let hold = self.holds.remove(id)?;
        self.counter.release(hold.num_seats());
        debug!(
            hold_id = %id,
            seats = hold.num_seats(),
            held_ms = u64::try_from(now.saturating_duration_since(hold.created_at()).as_millis())
                .unwrap_or(u64::MAX),
            "hold expired"
        );
        Some(hold.num_seats())
    }
}

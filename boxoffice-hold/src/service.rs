use crate::error::{HoldError, ReserveError};
use crate::expiry::{ExpirationSweeper, HoldStatus, SweepReport};
use crate::snapshot::AvailabilitySnapshot;
use boxoffice_core::{Clock, HoldId, SeatHold, SystemClock, Venue, DEFAULT_HOLD_TTL};
use boxoffice_inventory::AvailabilityCounter;
use boxoffice_store::HoldStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Counters and holds, guarded together.
#[derive(Debug)]
struct Ledger {
    counter: AvailabilityCounter,
    holds: HoldStore,
}

impl Ledger {
    fn sweeper(&mut self) -> ExpirationSweeper<'_> {
        ExpirationSweeper::new(&mut self.holds, &mut self.counter)
    }
}

/// Seat hold and reservation service for one venue.
///
/// Every operation runs under a single lock over the counters and the hold
/// store, so check-then-act sequences from concurrent callers never
/// interleave. Share it behind an `Arc`; all state goes away with it.
///
/// Hold lifecycle:
/// `Active -> Reserved` via [`reserve`](Self::reserve) before the deadline,
/// `Active -> Expired` once any sweep or check observes the deadline passed.
/// Both are terminal.
pub struct TicketService {
    venue: Venue,
    hold_ttl: Duration,
    clock: Arc<dyn Clock>,
    ledger: Mutex<Ledger>,
}

impl TicketService {
    pub fn new(venue: Venue) -> Self {
        Self::with_clock(venue, DEFAULT_HOLD_TTL, Arc::new(SystemClock))
    }

    pub fn with_clock(venue: Venue, hold_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            venue,
            hold_ttl,
            clock,
            ledger: Mutex::new(Ledger {
                counter: AvailabilityCounter::new(&venue),
                holds: HoldStore::new(),
            }),
        }
    }

    pub fn venue(&self) -> Venue {
        self.venue
    }

    pub fn hold_ttl(&self) -> Duration {
        self.hold_ttl
    }

    /// Seats neither held nor reserved. Does not sweep.
    pub fn num_seats_available(&self) -> u32 {
        self.ledger().counter.available()
    }

    pub fn num_seats_reserved(&self) -> u32 {
        self.ledger().counter.reserved()
    }

    /// Hold `num_seats` seats, after reclaiming any lapsed holds.
    ///
    /// Returns `Ok(None)` when not enough seats are available.
    pub fn find_and_hold_seats(&self, num_seats: u32) -> Result<Option<SeatHold>, HoldError> {
        if num_seats == 0 {
            warn!("rejected hold request for zero seats");
            return Err(HoldError::InvalidSeatCount(num_seats));
        }

        let mut ledger = self.ledger();
        let now = self.clock.now();
        Self::log_sweep(ledger.sweeper().sweep_all(now));

        // Built before any seats move so a bad TTL leaves the counters alone.
        let hold = SeatHold::new(num_seats, now, self.hold_ttl).ok_or_else(|| {
            warn!(ttl = ?self.hold_ttl, "hold deadline out of range");
            HoldError::TtlOutOfRange(self.hold_ttl)
        })?;

        if !ledger.counter.try_hold(num_seats) {
            return Ok(None);
        }

        debug!(hold_id = %hold.id(), seats = num_seats, "seats held");
        ledger.holds.put(hold.clone());
        Ok(Some(hold))
    }

    /// Convert an active hold into a reservation, returning its confirmation id.
    pub fn reserve(&self, seat_hold_id: &HoldId) -> Result<String, ReserveError> {
        let mut ledger = self.ledger();
        let now = self.clock.now();

        let status = ledger.sweeper().check_one(seat_hold_id, now);
        match status {
            HoldStatus::NotFound => Err(ReserveError::NotFound(seat_hold_id.clone())),
            HoldStatus::Expired => Err(ReserveError::Expired(seat_hold_id.clone())),
            HoldStatus::Valid => {
                let hold = ledger
                    .holds
                    .remove(seat_hold_id)
                    .ok_or_else(|| ReserveError::NotFound(seat_hold_id.clone()))?;
                ledger.counter.commit_reservation(hold.num_seats());
                info!(hold_id = %seat_hold_id, seats = hold.num_seats(), "seats reserved");
                Ok(hold.id().to_string())
            }
        }
    }

    /// [`reserve`](Self::reserve) without the failure reason.
    pub fn reserve_seats(&self, seat_hold_id: &str) -> Option<String> {
        self.reserve(&HoldId::from(seat_hold_id)).ok()
    }

    /// Check one hold, reclaiming it if expired.
    pub fn check_hold(&self, seat_hold_id: &HoldId) -> HoldStatus {
        let mut ledger = self.ledger();
        let now = self.clock.now();
        ledger.sweeper().check_one(seat_hold_id, now)
    }

    /// Reclaim every lapsed hold.
    pub fn sweep_expired(&self) -> SweepReport {
        let mut ledger = self.ledger();
        let now = self.clock.now();
        let report = ledger.sweeper().sweep_all(now);
        Self::log_sweep(report);
        report
    }

    pub fn snapshot(&self) -> AvailabilitySnapshot {
        let ledger = self.ledger();
        AvailabilitySnapshot {
            max_seats: self.venue.max_seats(),
            available: ledger.counter.available(),
            reserved: ledger.counter.reserved(),
            held: ledger.holds.held_seats(),
            active_holds: ledger.holds.len(),
        }
    }

    // Each mutation leaves the ledger balanced before anything can panic,
    // so a poisoned lock still guards consistent state.
    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn log_sweep(report: SweepReport) {
        if report.holds > 0 {
            info!(holds = report.holds, seats = report.seats, "reclaimed expired holds");
        }
    }
}

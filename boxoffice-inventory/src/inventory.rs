use boxoffice_core::Venue;
use tracing::debug;

/// Seat accounting for a single venue.
///
/// Seats move `available -> held` on [`try_hold`](Self::try_hold), then
/// either back to available on [`release`](Self::release) or into
/// `reserved` on [`commit_reservation`](Self::commit_reservation). Held seats
/// are not counted here; they live in the hold store.
#[derive(Debug, Clone)]
pub struct AvailabilityCounter {
    available: u32,
    reserved: u32,
}

impl AvailabilityCounter {
    pub fn new(venue: &Venue) -> Self {
        Self {
            available: venue.max_seats(),
            reserved: 0,
        }
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn reserved(&self) -> u32 {
        self.reserved
    }

    /// Take `quantity` seats out of the available pool if there are enough.
    pub fn try_hold(&mut self, quantity: u32) -> bool {
        if self.available < quantity {
            debug!(requested = quantity, available = self.available, "insufficient seats");
            return false;
        }

        self.available -= quantity;
        true
    }

    /// Return held seats to the available pool (hold expired).
    pub fn release(&mut self, quantity: u32) {
        self.available += quantity;
    }

    /// Count held seats as reserved. They already left `available` when held.
    pub fn commit_reservation(&mut self, quantity: u32) {
        self.reserved += quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_lifecycle() {
        let mut counter = AvailabilityCounter::new(&Venue::new(10));
        assert_eq!(counter.available(), 10);

        // Hold
        assert!(counter.try_hold(4));
        assert_eq!(counter.available(), 6);

        // Reserve the hold
        counter.commit_reservation(4);
        assert_eq!(counter.available(), 6);
        assert_eq!(counter.reserved(), 4);

        // Hold and let it lapse
        assert!(counter.try_hold(6));
        assert_eq!(counter.available(), 0);
        counter.release(6);
        assert_eq!(counter.available(), 6);
        assert_eq!(counter.reserved(), 4);
    }

    #[test]
    fn test_try_hold_never_goes_negative() {
        let mut counter = AvailabilityCounter::new(&Venue::new(3));

        assert!(!counter.try_hold(4));
        assert_eq!(counter.available(), 3);

        assert!(counter.try_hold(3));
        assert!(!counter.try_hold(1));
        assert_eq!(counter.available(), 0);
    }

    #[test]
    fn test_empty_venue() {
        let mut counter = AvailabilityCounter::new(&Venue::new(0));
        assert_eq!(counter.available(), 0);
        assert!(!counter.try_hold(1));
        assert!(counter.try_hold(0));
    }
}

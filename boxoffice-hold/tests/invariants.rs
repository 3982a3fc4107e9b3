use boxoffice_core::{HoldId, ManualClock, Venue};
use boxoffice_hold::{HoldError, HoldStatus, ReserveError, TicketService};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const TTL_MS: u64 = 5_000;
const MAX_SEATS: u32 = 30;

#[derive(Debug, Clone)]
enum Op {
    Hold(u32),
    Reserve(usize),
    Check(usize),
    Advance(u64),
    Sweep,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..12).prop_map(Op::Hold),
        2 => any::<usize>().prop_map(Op::Reserve),
        2 => any::<usize>().prop_map(Op::Check),
        2 => (0u64..3_000).prop_map(Op::Advance),
        1 => Just(Op::Sweep),
    ]
}

/// Mirror of one hold. `in_store` drops to false once the service has
/// reserved or reclaimed it.
struct ModelHold {
    id: HoldId,
    seats: u32,
    created_ms: u64,
    in_store: bool,
}

impl ModelHold {
    fn expired(&self, now_ms: u64) -> bool {
        now_ms >= self.created_ms + TTL_MS
    }

    fn live(&self, now_ms: u64) -> bool {
        self.in_store && !self.expired(now_ms)
    }

    /// What `check_one` should report, updating the model the same way.
    fn observe(&mut self, now_ms: u64) -> HoldStatus {
        if !self.in_store {
            HoldStatus::NotFound
        } else if self.expired(now_ms) {
            self.in_store = false;
            HoldStatus::Expired
        } else {
            HoldStatus::Valid
        }
    }
}

fn sweep(model: &mut [ModelHold], now_ms: u64) {
    for hold in model.iter_mut().filter(|h| h.expired(now_ms)) {
        hold.in_store = false;
    }
}

fn live_seats(model: &[ModelHold], now_ms: u64) -> u32 {
    model.iter().filter(|h| h.live(now_ms)).map(|h| h.seats).sum()
}

proptest! {
    #[test]
    fn prop_seat_accounting_holds(ops in prop::collection::vec(op(), 1..60)) {
        let clock = Arc::new(ManualClock::new());
        let service = TicketService::with_clock(
            Venue::new(MAX_SEATS),
            Duration::from_millis(TTL_MS),
            clock.clone(),
        );
        let mut model: Vec<ModelHold> = Vec::new();
        let mut reserved = 0u32;

        for op in ops {
            let now_ms = clock.elapsed().as_millis() as u64;
            match op {
                Op::Hold(0) => {
                    prop_assert_eq!(
                        service.find_and_hold_seats(0),
                        Err(HoldError::InvalidSeatCount(0))
                    );
                }
                Op::Hold(n) => {
                    sweep(&mut model, now_ms);
                    let free = MAX_SEATS - reserved - live_seats(&model, now_ms);
                    match service.find_and_hold_seats(n) {
                        Ok(Some(hold)) => {
                            prop_assert!(n <= free);
                            prop_assert_eq!(service.num_seats_available(), free - n);
                            model.push(ModelHold {
                                id: hold.id().clone(),
                                seats: n,
                                created_ms: now_ms,
                                in_store: true,
                            });
                        }
                        Ok(None) => {
                            prop_assert!(n > free);
                            prop_assert_eq!(service.num_seats_available(), free);
                        }
                        Err(e) => prop_assert!(false, "unexpected error {e}"),
                    }
                }
                Op::Reserve(i) if !model.is_empty() => {
                    let idx = i % model.len();
                    let hold = &mut model[idx];
                    let result = service.reserve(&hold.id);
                    match hold.observe(now_ms) {
                        HoldStatus::Valid => {
                            prop_assert_eq!(result, Ok(hold.id.to_string()));
                            hold.in_store = false;
                            reserved += hold.seats;
                        }
                        HoldStatus::Expired => {
                            prop_assert_eq!(result, Err(ReserveError::Expired(hold.id.clone())));
                        }
                        HoldStatus::NotFound => {
                            prop_assert_eq!(result, Err(ReserveError::NotFound(hold.id.clone())));
                        }
                    }
                }
                Op::Check(i) if !model.is_empty() => {
                    let idx = i % model.len();
                    let hold = &mut model[idx];
                    let status = service.check_hold(&hold.id);
                    prop_assert_eq!(status, hold.observe(now_ms));
                }
                Op::Advance(ms) => clock.advance(Duration::from_millis(ms)),
                Op::Sweep => {
                    service.sweep_expired();
                    sweep(&mut model, now_ms);
                    prop_assert_eq!(
                        service.num_seats_available(),
                        MAX_SEATS - reserved - live_seats(&model, now_ms)
                    );
                }
                _ => {}
            }

            let snapshot = service.snapshot();
            prop_assert!(snapshot.is_balanced(), "unbalanced: {:?}", snapshot);
            prop_assert_eq!(snapshot.reserved, reserved);
            let in_store: u32 = model.iter().filter(|h| h.in_store).map(|h| h.seats).sum();
            prop_assert_eq!(snapshot.held, in_store);
        }
    }
}

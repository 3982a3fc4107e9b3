use boxoffice_hold::TicketService;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, trace};

/// Periodically reclaim lapsed holds. Runs until the handle is aborted.
pub fn start_expiration_worker(tickets: Arc<TicketService>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_ms = u64::try_from(every.as_millis()).unwrap_or(u64::MAX),
            "Expiration worker started"
        );

        loop {
            ticker.tick().await;
            let report = tickets.sweep_expired();
            trace!(holds = report.holds, seats = report.seats, "sweep finished");
        }
    })
}

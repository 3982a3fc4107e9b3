pub mod error;
pub mod expiry;
pub mod service;
pub mod snapshot;

pub use error::{HoldError, ReserveError};
pub use expiry::{ExpirationSweeper, HoldStatus, SweepReport};
pub use service::TicketService;
pub use snapshot::AvailabilitySnapshot;

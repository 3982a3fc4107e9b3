pub mod clock;
pub mod hold;
pub mod venue;

pub use clock::{Clock, ManualClock, SystemClock};
pub use hold::{HoldId, SeatHold, DEFAULT_HOLD_TTL, MAX_HOLD_TTL};
pub use venue::Venue;

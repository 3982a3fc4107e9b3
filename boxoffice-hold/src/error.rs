use boxoffice_core::HoldId;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HoldError {
    #[error("Invalid seat count: {0}, at least one seat must be held")]
    InvalidSeatCount(u32),

    #[error("Hold TTL out of range: {0:?}")]
    TtlOutOfRange(Duration),
}

/// Why a hold could not be turned into a reservation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReserveError {
    #[error("Hold not found: {0}")]
    NotFound(HoldId),

    #[error("Hold expired: {0}")]
    Expired(HoldId),
}

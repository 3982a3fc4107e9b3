use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a hold stays claimable when nothing else is configured.
pub const DEFAULT_HOLD_TTL: Duration = Duration::from_secs(5);

/// Longest TTL the service accepts (one day).
pub const MAX_HOLD_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Opaque hold identifier handed back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldId(String);

impl HoldId {
    /// Random v4 UUID. Collisions are not handled.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for HoldId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for HoldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A provisional claim on a block of seats.
///
/// The deadline is fixed when the hold is created; nothing about a hold
/// changes afterwards, it is only ever removed from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatHold {
    id: HoldId,
    num_seats: u32,
    created_at: Instant,
    expires_at: Instant,
}

impl SeatHold {
    /// `None` when `created_at + ttl` cannot be represented.
    pub fn new(num_seats: u32, created_at: Instant, ttl: Duration) -> Option<Self> {
        let expires_at = created_at.checked_add(ttl)?;
        Some(Self {
            id: HoldId::generate(),
            num_seats,
            created_at,
            expires_at,
        })
    }

    pub fn id(&self) -> &HoldId {
        &self.id
    }

    pub fn num_seats(&self) -> u32 {
        self.num_seats
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// A hold is expired from its deadline onwards (`now >= expires_at`).
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// The seating capacity being sold. Immutable once a service is built on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Venue {
    max_seats: u32,
}

impl Venue {
    pub const fn new(max_seats: u32) -> Self {
        Self { max_seats }
    }

    pub const fn max_seats(&self) -> u32 {
        self.max_seats
    }
}

//! Rental calendar math.
//!
//! A rental window is an inclusive range of calendar dates: a window that
//! starts and ends on the same day is one rental day.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;

/// Longest rental a single order item may cover.
pub const MAX_RENTAL_DAYS: u32 = 30;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RentalWindowError {
    #[error("rental end date is before the start date")]
    InvalidWindow,

    #[error("rental cannot start in the past")]
    StartsInPast,

    #[error("rental cannot be longer than {MAX_RENTAL_DAYS} days")]
    TooLong,

    #[error("rental price overflows")]
    PriceOverflow,
}

/// Inclusive `[start, end]` rental window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalWindow {
    start: Date,
    end: Date,
}

impl RentalWindow {
    /// # Errors
    ///
    /// Returns [`RentalWindowError::InvalidWindow`] when `end` precedes `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, RentalWindowError> {
        if end < start {
            return Err(RentalWindowError::InvalidWindow);
        }

        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of billable days, counting both ends.
    #[must_use]
    pub fn days(&self) -> u32 {
        let span = self.end.since(self.start).map_or(0, |span| span.get_days());

        u32::try_from(span).map_or(0, |days| days + 1)
    }

    /// Check that the window is bookable as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error when the window starts before `today` or is longer
    /// than [`MAX_RENTAL_DAYS`].
    pub fn validate(&self, today: Date) -> Result<(), RentalWindowError> {
        if self.start < today {
            return Err(RentalWindowError::StartsInPast);
        }

        if self.days() > MAX_RENTAL_DAYS {
            return Err(RentalWindowError::TooLong);
        }

        Ok(())
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// The current calendar date in UTC, used to reject windows in the past.
#[must_use]
pub fn today_utc() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}

/// Total price of renting at `per_day` for `window`.
///
/// # Errors
///
/// Returns [`RentalWindowError::PriceOverflow`] when the total does not fit.
pub fn rental_price(per_day: u64, window: &RentalWindow) -> Result<u64, RentalWindowError> {
    per_day
        .checked_mul(u64::from(window.days()))
        .ok_or(RentalWindowError::PriceOverflow)
}

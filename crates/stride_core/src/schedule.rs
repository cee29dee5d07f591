//! Weekday schedule codec.
//!
//! Routines store their cadence as a compact 7-bit mask, one bit per
//! weekday with bit 0 = Monday. The wire shape stays a readable list of
//! day names; the conversion is lossless in both directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    /// Monday, bit 0.
    Monday,
    /// Tuesday, bit 1.
    Tuesday,
    /// Wednesday, bit 2.
    Wednesday,
    /// Thursday, bit 3.
    Thursday,
    /// Friday, bit 4.
    Friday,
    /// Saturday, bit 5.
    Saturday,
    /// Sunday, bit 6.
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical Monday-first order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Bit position of this weekday in a schedule mask.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// A set of scheduled weekdays packed into a 7-bit mask.
///
/// Serializes as the list of scheduled day names, so API payloads stay
/// readable while storage keeps the compact integer form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct ScheduleMask(u8);

impl ScheduleMask {
    /// Mask with no weekday scheduled.
    pub const EMPTY: ScheduleMask = ScheduleMask(0);

    /// Mask with every weekday scheduled.
    pub const FULL_WEEK: ScheduleMask = ScheduleMask(0x7F);

    /// Builds a mask from a sequence of weekdays, ignoring duplicates.
    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut bits = 0u8;
        for day in days {
            bits |= 1 << day.bit();
        }
        Self(bits)
    }

    /// Builds a mask from raw bits.
    ///
    /// Returns `None` if any bit above the seven weekday bits is set.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::FULL_WEEK.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Returns the raw mask bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no weekday is scheduled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the given weekday is scheduled.
    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.bit()) != 0
    }

    /// Returns the scheduled weekdays in ascending Monday-first order,
    /// without duplicates.
    #[must_use]
    pub fn days(self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.contains(*day))
            .collect()
    }
}

impl From<Vec<Weekday>> for ScheduleMask {
    fn from(days: Vec<Weekday>) -> Self {
        Self::from_days(days)
    }
}

impl From<ScheduleMask> for Vec<Weekday> {
    fn from(mask: ScheduleMask) -> Self {
        mask.days()
    }
}

impl fmt::Debug for ScheduleMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleMask({:#09b})", self.0)
    }
}

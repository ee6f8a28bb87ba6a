//! Weekdays and minute-of-day helpers.

use std::fmt;

/// A teaching day on the weekly grid.
///
/// Meetings store their day as a number (`1` = Monday through `6` =
/// Saturday); Sunday is never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// The five weekdays, Monday first.
    pub const WORK_WEEK: [Weekday; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Converts a stored day number into a [`Weekday`].
    ///
    /// Returns `None` for anything outside `1..=6`.
    pub fn from_number(day: u8) -> Option<Self> {
        match day {
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            _ => None,
        }
    }

    /// The stored day number, `1` for Monday.
    pub fn number(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// Full English name, used as the grid column header.
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats minutes since midnight as a zero-padded `HH:MM` string.
///
/// # Examples
///
/// ```
/// use coursegrid_core::time::format_minutes;
///
/// assert_eq!(format_minutes(510), "08:30");
/// assert_eq!(format_minutes(1320), "22:00");
/// ```
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

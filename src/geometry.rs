//! Plane geometry and clock conversions.
//!
//! All times inside the crate are minutes relative to a fixed day-start
//! reference of 09:00. Earlier clock times are negative offsets, so an
//! attraction opening at 06:30 has an offset of `-150`.

use crate::error::{Error, Result};

/// Hour of day that maps to offset `0`.
pub const DAY_START_HOUR: i32 = 9;

/// A point in the Euclidean plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(*self, *other)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Converts a plane distance into travel minutes.
#[inline]
pub fn travel_minutes(distance: f64, minutes_per_unit: f64) -> f64 {
    distance * minutes_per_unit
}

/// Parses an `HH:MM` clock time into a day-start offset in minutes.
///
/// ```
/// use u_tourplan::geometry::clock_to_offset;
///
/// assert_eq!(clock_to_offset("09:00").unwrap(), 0);
/// assert_eq!(clock_to_offset("06:30").unwrap(), -150);
/// assert_eq!(clock_to_offset("23:59").unwrap(), 899);
/// ```
pub fn clock_to_offset(clock: &str) -> Result<i32> {
    let invalid = || Error::InvalidClock(clock.to_string());

    let (h, m) = clock.trim().split_once(':').ok_or_else(invalid)?;
    let hours: i32 = h.parse().map_err(|_| invalid())?;
    let minutes: i32 = m.parse().map_err(|_| invalid())?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    Ok((hours - DAY_START_HOUR) * 60 + minutes)
}

/// Formats a day-start offset as an `HH:MM` clock string.
///
/// Offsets past midnight keep counting hours (`"25:10"`), which keeps
/// late-running timelines readable without a day field.
pub fn offset_to_clock(offset: i32) -> String {
    let hours = DAY_START_HOUR + offset.div_euclid(60);
    let minutes = offset.rem_euclid(60);
    format!("{hours:02}:{minutes:02}")
}

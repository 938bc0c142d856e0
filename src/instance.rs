//! Problem instance: attractions, hotel and budget.
//!
//! An [`Instance`] is validated once at construction and never mutated
//! afterwards. Planners take their own copy, so several planners can run
//! against the same data without sharing anything.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geometry::Point;

/// Identifier of an attraction. Positive and unique within an instance.
pub type AttractionId = u32;

/// Minutes in a day; the longest allowed opening window.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// A point of interest with a daily time window.
///
/// `open` and `close` are minute offsets from the 09:00 day start
/// (see [`crate::geometry::clock_to_offset`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attraction {
    pub id: AttractionId,
    pub name: Option<String>,
    pub location: Point,
    pub open: i32,
    pub close: i32,
    /// Visit length in minutes.
    pub duration: u32,
    /// Admission price in currency units.
    pub cost: u64,
}

impl Attraction {
    pub fn new(
        id: AttractionId,
        location: impl Into<Point>,
        open: i32,
        close: i32,
        duration: u32,
        cost: u64,
    ) -> Self {
        Self {
            id,
            name: None,
            location: location.into(),
            open,
            close,
            duration,
            cost,
        }
    }

    /// Attaches a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidAttraction {
            id: self.id,
            reason: reason.to_string(),
        };

        if self.id == 0 {
            return Err(invalid("id must be positive"));
        }
        if self.duration == 0 {
            return Err(invalid("duration must be positive"));
        }
        if self.close < self.open {
            return Err(invalid("closes before it opens"));
        }
        if self.close - self.open > MINUTES_PER_DAY {
            return Err(invalid("opening window longer than a day"));
        }
        if !self.location.x.is_finite() || !self.location.y.is_finite() {
            return Err(invalid("location must be finite"));
        }
        Ok(())
    }
}

/// A validated planning instance.
///
/// # Examples
///
/// ```
/// use u_tourplan::instance::{Attraction, Instance};
/// use u_tourplan::geometry::Point;
///
/// let instance = Instance::new(
///     Point::ORIGIN,
///     vec![
///         Attraction::new(1, (0.5, 0.0), -120, 540, 60, 20_000),
///         Attraction::new(2, (0.0, 0.8), 0, 600, 45, 5_000),
///     ],
///     100_000,
/// )
/// .unwrap();
///
/// assert_eq!(instance.len(), 2);
/// assert_eq!(instance.total_cost(), 25_000);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    hotel: Point,
    attractions: Vec<Attraction>,
    index: HashMap<AttractionId, usize>,
    budget: u64,
}

impl Instance {
    /// Validates and builds an instance.
    ///
    /// Fails on duplicate ids, malformed attractions, or a negative budget.
    pub fn new(hotel: Point, attractions: Vec<Attraction>, budget: i64) -> Result<Self> {
        if budget < 0 {
            return Err(Error::NegativeBudget(budget));
        }
        if !hotel.x.is_finite() || !hotel.y.is_finite() {
            return Err(Error::InvalidHotel {
                x: hotel.x,
                y: hotel.y,
            });
        }

        let mut index = HashMap::with_capacity(attractions.len());
        for (i, a) in attractions.iter().enumerate() {
            a.validate()?;
            if index.insert(a.id, i).is_some() {
                return Err(Error::DuplicateAttraction(a.id));
            }
        }

        Ok(Self {
            hotel,
            attractions,
            index,
            budget: budget as u64,
        })
    }

    pub fn hotel(&self) -> Point {
        self.hotel
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    /// Attractions in table order. Table positions are the genes the
    /// planners work with internally.
    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn get(&self, id: AttractionId) -> Option<&Attraction> {
        self.index.get(&id).map(|&i| &self.attractions[i])
    }

    /// Table position of `id`.
    pub fn position(&self, id: AttractionId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// All ids in table order.
    pub fn ids(&self) -> Vec<AttractionId> {
        self.attractions.iter().map(|a| a.id).collect()
    }

    /// Sum of every admission price, saturating at `u64::MAX`.
    pub fn total_cost(&self) -> u64 {
        self.attractions
            .iter()
            .fold(0u64, |total, a| total.saturating_add(a.cost))
    }

    /// Maps a route of ids to table positions.
    ///
    /// Rejects unknown ids and ids that appear twice. Omissions are
    /// allowed, since greedy routes visit a subset.
    pub fn resolve(&self, route: &[AttractionId]) -> Result<Vec<usize>> {
        let mut seen = vec![false; self.attractions.len()];
        route
            .iter()
            .map(|&id| {
                let pos = self.position(id).ok_or(Error::UnknownAttraction(id))?;
                if std::mem::replace(&mut seen[pos], true) {
                    return Err(Error::RepeatedStop(id));
                }
                Ok(pos)
            })
            .collect()
    }

    /// Maps table positions back to ids.
    pub fn ids_of(&self, positions: &[usize]) -> Vec<AttractionId> {
        positions.iter().map(|&p| self.attractions[p].id).collect()
    }

    /// Checks that `positions` visits every table entry exactly once.
    pub fn check_permutation(&self, positions: &[usize]) -> Result<()> {
        let n = self.attractions.len();
        if positions.len() != n {
            return Err(Error::PermutationBreach(format!(
                "expected {n} stops, got {}",
                positions.len()
            )));
        }
        let mut seen = vec![false; n];
        for &p in positions {
            if p >= n || std::mem::replace(&mut seen[p], true) {
                return Err(Error::PermutationBreach(format!(
                    "gene {p} out of range or repeated in {positions:?}"
                )));
            }
        }
        Ok(())
    }
}

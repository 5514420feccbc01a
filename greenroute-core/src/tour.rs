//! Visiting orders over a set of stops.
//!
//! A [`Tour`] is a permutation of stop indices that always starts at the
//! depot (index 0). Tours are open: no closing leg back to the depot is
//! costed. The mutation helpers keep the permutation intact and never move
//! the depot.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::{Cost, DistanceMatrix};

/// Errors returned when a visiting order is not a valid tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    /// The order has a different length from the number of stops.
    #[error("tour visits {actual} stops but {expected} were supplied")]
    LengthMismatch {
        /// Number of stops in the problem.
        expected: usize,
        /// Number of entries in the order.
        actual: usize,
    },
    /// The order does not begin at the depot.
    #[error("tour must start at the depot (index 0), found {found}")]
    DepotNotFirst {
        /// First entry in the order.
        found: usize,
    },
    /// A stop index is not below the tour length.
    #[error("stop index {index} is out of range for {len} stops")]
    OutOfRange {
        /// Offending stop index.
        index: usize,
        /// Tour length.
        len: usize,
    },
    /// A stop index appears more than once.
    #[error("stop index {index} is visited more than once")]
    Duplicate {
        /// Repeated stop index.
        index: usize,
    },
    /// A move addressed positions outside the movable part of the tour.
    #[error("move over positions {start}..={end} is invalid for a tour of {len} stops")]
    InvalidMove {
        /// First position touched by the move.
        start: usize,
        /// Last position touched by the move.
        end: usize,
        /// Tour length.
        len: usize,
    },
}

/// An ordered visit of every stop exactly once, starting at the depot.
///
/// # Examples
/// ```
/// use greenroute_core::{DistanceMatrix, Tour};
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0, 2, 9],
///     vec![2, 0, 4],
///     vec![9, 4, 0],
/// ])?;
/// let tour = Tour::new(vec![0, 1, 2])?;
/// assert_eq!(tour.cost(&matrix), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Validate and wrap a visiting order.
    ///
    /// # Errors
    /// Returns [`TourError`] when the order is not a permutation of
    /// `0..order.len()` beginning at index 0.
    pub fn new(order: Vec<usize>) -> Result<Self, TourError> {
        let len = order.len();
        if let Some(&found) = order.first()
            && found != 0
        {
            return Err(TourError::DepotNotFirst { found });
        }
        let mut seen = vec![false; len];
        for &index in &order {
            match seen.get_mut(index) {
                None => return Err(TourError::OutOfRange { index, len }),
                Some(true) => return Err(TourError::Duplicate { index }),
                Some(flag) => *flag = true,
            }
        }
        Ok(Self { order })
    }

    /// Validate an order against the number of stops in the problem.
    ///
    /// # Errors
    /// Returns [`TourError::LengthMismatch`] when the order does not cover
    /// exactly `stop_count` stops, or any error from [`Tour::new`].
    pub fn for_stops(order: Vec<usize>, stop_count: usize) -> Result<Self, TourError> {
        if order.len() != stop_count {
            return Err(TourError::LengthMismatch {
                expected: stop_count,
                actual: order.len(),
            });
        }
        Self::new(order)
    }

    /// The order `0, 1, …, len - 1`.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// Stop indices in visiting order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Number of stops visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tour visits no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Release the underlying order.
    #[must_use]
    pub fn into_inner(self) -> Vec<usize> {
        self.order
    }

    /// Sum of consecutive edge costs; the closing edge is not counted.
    ///
    /// The sum saturates at [`Cost::MAX`].
    ///
    /// # Panics
    /// Panics if the tour references stops the matrix does not cover.
    #[must_use]
    pub fn cost(&self, matrix: &DistanceMatrix) -> Cost {
        self.order
            .windows(2)
            .map(|pair| match pair {
                [from, to] => matrix.cost(*from, *to),
                _ => 0,
            })
            .fold(0, Cost::saturating_add)
    }

    /// Arrange `records` in visiting order.
    ///
    /// Returns `None` when `records` does not hold one entry per stop.
    ///
    /// # Examples
    /// ```
    /// use greenroute_core::Tour;
    ///
    /// let tour = Tour::new(vec![0, 2, 1])?;
    /// let jobs = ["yard", "hedge", "lawn"];
    /// assert_eq!(tour.reorder(&jobs), Some(vec!["yard", "lawn", "hedge"]));
    /// # Ok::<(), greenroute_core::TourError>(())
    /// ```
    #[must_use]
    pub fn reorder<T: Clone>(&self, records: &[T]) -> Option<Vec<T>> {
        if records.len() != self.order.len() {
            return None;
        }
        self.order
            .iter()
            .map(|&index| records.get(index).cloned())
            .collect()
    }

    /// Reverse the stops at `positions` in place (a 2-opt move).
    ///
    /// # Errors
    /// Returns [`TourError::InvalidMove`] if the range touches the depot or
    /// runs past the end of the tour.
    pub fn reverse(&mut self, positions: RangeInclusive<usize>) -> Result<(), TourError> {
        let (start, end) = (*positions.start(), *positions.end());
        let segment = self.movable(start, end)?;
        segment.reverse();
        Ok(())
    }

    /// Move the stops at `positions` so they follow the stop currently at
    /// position `after` (an Or-opt move).
    ///
    /// `after` must lie outside the segment and must not be the position
    /// directly before it, which would leave the tour unchanged.
    ///
    /// # Errors
    /// Returns [`TourError::InvalidMove`] for ranges touching the depot,
    /// running past the end, or targets inside or adjacent to the segment.
    pub fn relocate(
        &mut self,
        positions: RangeInclusive<usize>,
        after: usize,
    ) -> Result<(), TourError> {
        let (start, end) = (*positions.start(), *positions.end());
        let len = self.order.len();
        self.movable(start, end)?;
        let invalid = TourError::InvalidMove { start, end, len };
        if after >= len || (after + 1 >= start && after <= end) {
            return Err(invalid);
        }
        let segment: Vec<usize> = self.order.drain(start..=end).collect();
        let insert_at = if after < start {
            after + 1
        } else {
            after + 1 - segment.len()
        };
        self.order.splice(insert_at..insert_at, segment);
        Ok(())
    }

    fn movable(&mut self, start: usize, end: usize) -> Result<&mut [usize], TourError> {
        let len = self.order.len();
        if start == 0 || start > end {
            return Err(TourError::InvalidMove { start, end, len });
        }
        self.order
            .get_mut(start..=end)
            .ok_or(TourError::InvalidMove { start, end, len })
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.order
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.order
    }
}

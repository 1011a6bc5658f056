//! Immutable composition table.

use crate::error::{TableError, TableResult};
use tt_core::numeric::{Real, ensure_unit_interval};

/// Result of locating a query composition within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowerBound {
    /// Query lies strictly below the first tabulated composition.
    Below,
    /// Index of the greatest tabulated composition `<=` the query.
    At(usize),
    /// Query lies strictly above the last tabulated composition.
    Above,
}

/// Ordered `(x, y)` table over mole fraction.
///
/// Invariants, checked once in [`Table::new`]:
/// - at least [`Table::MIN_POINTS`] points
/// - every `x` in `[0, 1]`, strictly increasing
/// - every `y` finite
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    points: Vec<(Real, Real)>,
}

impl Table {
    pub const MIN_POINTS: usize = 2;

    /// Build a table from `(x, y)` pairs already sorted by `x`.
    pub fn new(points: Vec<(Real, Real)>) -> TableResult<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(TableError::invalid(format!(
                "need at least {} points, got {}",
                Self::MIN_POINTS,
                points.len()
            )));
        }

        for (i, &(x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(TableError::invalid(format!(
                    "non-finite entry at point {i}: ({x}, {y})"
                )));
            }
            ensure_unit_interval(x, "table composition")
                .map_err(|e| TableError::invalid(format!("point {i}: {e}")))?;
        }

        if let Some(i) = points.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(TableError::invalid(format!(
                "compositions not strictly increasing at point {}: {} after {}",
                i + 1,
                points[i + 1].0,
                points[i].0
            )));
        }

        Ok(Self { points })
    }

    /// Number of tabulated points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a validated table has at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<(Real, Real)> {
        self.points.get(i).copied()
    }

    pub fn points(&self) -> &[(Real, Real)] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.points.iter().copied()
    }

    pub fn first(&self) -> (Real, Real) {
        self.points[0]
    }

    pub fn last(&self) -> (Real, Real) {
        self.points[self.points.len() - 1]
    }

    pub fn x_min(&self) -> Real {
        self.first().0
    }

    pub fn x_max(&self) -> Real {
        self.last().0
    }

    /// Locate `x` by binary search.
    ///
    /// NaN never orders against the table and reports [`LowerBound::Below`].
    pub fn lower_bound(&self, x: Real) -> LowerBound {
        if x > self.x_max() {
            return LowerBound::Above;
        }
        match self.points.partition_point(|&(xi, _)| xi <= x).checked_sub(1) {
            Some(i) => LowerBound::At(i),
            None => LowerBound::Below,
        }
    }
}

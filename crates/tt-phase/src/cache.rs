//! Reference-state cache for the tracked species.
//!
//! Property queries vastly outnumber composition changes, so the two table
//! lookups run only when the tracked mole fraction has moved.

use tracing::debug;
use tt_core::TtError;
use tt_core::numeric::{Real, ensure_finite};
use tt_core::units::{MolarEnthalpy, MolarEntropy};
use tt_tables::{TablePair, TableResult};

/// Whether the cache reflects a given composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Stale,
    Fresh,
}

/// Last evaluated composition and the interpolated enthalpy/entropy there.
///
/// `enthalpy`/`entropy` are only written by [`ReferenceStateCache::ensure_updated`],
/// always as the interpolation of `last_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceStateCache {
    last_x: Option<Real>,
    enthalpy: MolarEnthalpy,
    entropy: MolarEntropy,
    tolerance: Real,
    evaluations: u64,
}

impl Default for ReferenceStateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceStateCache {
    /// Composition change below which cached values are reused.
    pub const DEFAULT_TOLERANCE: Real = 1e-15;

    pub const fn new() -> Self {
        Self {
            last_x: None,
            enthalpy: 0.0,
            entropy: 0.0,
            tolerance: Self::DEFAULT_TOLERANCE,
            evaluations: 0,
        }
    }

    /// Cache with a custom staleness tolerance (finite, non-negative).
    pub fn with_tolerance(tolerance: Real) -> Result<Self, TtError> {
        let tolerance = ensure_finite(tolerance, "composition tolerance")?;
        if tolerance < 0.0 {
            return Err(TtError::OutOfRange {
                what: "composition tolerance",
                value: tolerance,
                min: 0.0,
                max: Real::INFINITY,
            });
        }
        Ok(Self {
            tolerance,
            ..Self::new()
        })
    }

    pub fn tolerance(&self) -> Real {
        self.tolerance
    }

    pub fn state(&self, x: Real) -> CacheState {
        match self.last_x {
            // NaN never compares within tolerance, so it always recomputes (and errors).
            Some(last) if (x - last).abs() <= self.tolerance => CacheState::Fresh,
            _ => CacheState::Stale,
        }
    }

    /// Recompute from `tables` if `x` moved beyond the tolerance.
    ///
    /// Returns `true` when a recompute happened. On error the cache is unchanged.
    pub fn ensure_updated(&mut self, x: Real, tables: &TablePair) -> TableResult<bool> {
        if self.state(x) == CacheState::Fresh {
            return Ok(false);
        }

        let (h, s) = tables.evaluate(x)?;
        debug!(x, previous_x = ?self.last_x, h, s, "reference state recomputed");
        self.last_x = Some(x);
        self.enthalpy = h;
        self.entropy = s;
        self.evaluations += 1;
        Ok(true)
    }

    pub fn last_composition(&self) -> Option<Real> {
        self.last_x
    }

    /// Cached `(h, s)`, or `None` before the first evaluation.
    pub fn values(&self) -> Option<(MolarEnthalpy, MolarEntropy)> {
        self.last_x.map(|_| (self.enthalpy, self.entropy))
    }

    /// Number of recomputations so far (each interpolates both tables once).
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Force the next [`ReferenceStateCache::ensure_updated`] to recompute.
    pub fn invalidate(&mut self) {
        self.last_x = None;
    }
}

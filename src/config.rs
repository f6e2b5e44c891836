//! Load-factor bounds that drive growth and shrink.

use thiserror::Error;

/// Default lower load bound; below it the next insert shrinks one step.
pub const LOAD_LOW: f64 = 0.15;
/// Default upper load bound; above it the next insert grows one step.
pub const LOAD_HIGH: f64 = 0.85;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("low bound {0} must lie in [0, 1)")]
    Low(f64),
    #[error("high bound {0} must lie in (0, 1]")]
    High(f64),
    #[error("low bound {low} must be below high bound {high}")]
    Inverted { low: f64, high: f64 },
}

/// Open interval `(low, high)` the load factor is kept within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadBounds {
    low: f64,
    high: f64,
}

impl LoadBounds {
    pub fn new(low: f64, high: f64) -> Result<Self, BoundsError> {
        if !(0.0..1.0).contains(&low) {
            return Err(BoundsError::Low(low));
        }
        if !(high > 0.0 && high <= 1.0) {
            return Err(BoundsError::High(high));
        }
        if low >= high {
            return Err(BoundsError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    pub(crate) fn above(&self, load: f64) -> bool {
        load > self.high
    }

    #[inline]
    pub(crate) fn below(&self, load: f64) -> bool {
        load < self.low
    }
}

impl Default for LoadBounds {
    fn default() -> Self {
        Self {
            low: LOAD_LOW,
            high: LOAD_HIGH,
        }
    }
}

//! Per-DOF clamp tables applied to the angle vector after every solver step.

use serde::{Deserialize, Serialize};

use crate::error::LimitError;

/// Clamp rule for one channel of the angle vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DofLimit {
    /// No clamping.
    Free,
    /// Interval projection. Either bound may be open.
    Range {
        lower: Option<f64>,
        upper: Option<f64>,
    },
    /// Channel forced to a fixed value.
    Pinned(f64),
}

impl DofLimit {
    /// Clamp a single channel value through this rule.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Free => value,
            Self::Range { lower, upper } => {
                let mut v = value;
                if let Some(lo) = lower
                    && v < lo
                {
                    v = lo;
                }
                if let Some(hi) = upper
                    && v > hi
                {
                    v = hi;
                }
                v
            }
            Self::Pinned(pinned) => pinned,
        }
    }

    fn validate(self, dof: usize) -> Result<(), LimitError> {
        match self {
            Self::Free => Ok(()),
            Self::Range { lower, upper } => {
                for bound in [lower, upper].into_iter().flatten() {
                    if !bound.is_finite() {
                        return Err(LimitError::NonFiniteBound { dof });
                    }
                }
                if let Some(lo) = lower
                    && let Some(hi) = upper
                    && lo > hi
                {
                    return Err(LimitError::InvertedRange {
                        dof,
                        lower: lo,
                        upper: hi,
                    });
                }
                Ok(())
            }
            Self::Pinned(pinned) => {
                if pinned.is_finite() {
                    Ok(())
                } else {
                    Err(LimitError::NonFiniteBound { dof })
                }
            }
        }
    }
}

/// Clamp table covering a whole angle vector, indexed by DOF.
///
/// Serializes as a plain list so it can sit directly in a TOML config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitTable {
    limits: Vec<DofLimit>,
}

impl LimitTable {
    pub const fn new(limits: Vec<DofLimit>) -> Self {
        Self { limits }
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn limits(&self) -> &[DofLimit] {
        &self.limits
    }

    /// Validate every entry. Returns Err on the first bad one.
    pub fn validate(&self) -> Result<(), LimitError> {
        for (dof, limit) in self.limits.iter().enumerate() {
            limit.validate(dof)?;
        }
        Ok(())
    }

    /// Clamp every channel in place.
    ///
    /// # Panics
    ///
    /// Panics if `theta.len()` differs from the table length.
    pub fn clamp(&self, theta: &mut [f64]) {
        assert_eq!(
            theta.len(),
            self.limits.len(),
            "theta.len() must equal limit table length"
        );
        for (value, limit) in theta.iter_mut().zip(&self.limits) {
            *value = limit.apply(*value);
        }
    }
}

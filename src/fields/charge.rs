use crate::constants::FIXED_CHARGES;
use crate::math::{R2, Scalar};

/// Point charge in the plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    /// Signed charge magnitude (arbitrary units).
    pub charge: Scalar,
    /// Position of the charge.
    pub position: R2,
}

impl PointCharge {
    /// Creates a charge `q` located at `(x, y)`.
    #[must_use]
    pub fn new(charge: Scalar, x: Scalar, y: Scalar) -> Self {
        Self { charge, position: R2::new(x, y) }
    }

    /// x coordinate of the charge.
    #[inline]
    #[must_use]
    pub fn x(&self) -> Scalar {
        self.position.x
    }

    /// y coordinate of the charge.
    #[inline]
    #[must_use]
    pub fn y(&self) -> Scalar {
        self.position.y
    }

    /// Same charge mirrored through the origin with its sign flipped.
    #[must_use]
    pub fn reflected_and_negated(&self) -> Self {
        Self { charge: -self.charge, position: -self.position }
    }
}

/// The two background charges present in every run: `+1 @ (1, 0)` and `-1 @ (-1, 0)`.
#[must_use]
pub fn fixed_charges() -> Vec<PointCharge> {
    FIXED_CHARGES.iter().map(|&(q, x, y)| PointCharge::new(q, x, y)).collect()
}

/// Smallest and largest charge magnitude in `charges`, or `None` when empty.
#[must_use]
pub fn charge_range(charges: &[PointCharge]) -> Option<(Scalar, Scalar)> {
    charges.iter().map(|c| c.charge).fold(None, |acc, q| match acc {
        None => Some((q, q)),
        Some((lo, hi)) => Some((lo.min(q), hi.max(q))),
    })
}

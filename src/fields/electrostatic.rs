use log::debug;

use crate::constants::{COULOMB_CONSTANT, SINGULARITY_GUARD};
use crate::fields::charge::PointCharge;
use crate::fields::grid::EvaluationGrid;
use crate::math::{Field2, R2, Scalar};

/// Constants entering the Coulomb superposition.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Coulomb's constant _k_.
    pub coulomb_constant: Scalar,
    /// Guard ε added to `r³` before dividing.
    pub singularity_guard: Scalar,
}

impl FieldConfig {
    /// Creates a configuration from explicit constants.
    #[must_use]
    pub fn new(coulomb_constant: Scalar, singularity_guard: Scalar) -> Self {
        Self { coulomb_constant, singularity_guard }
    }

    /// Returns a copy with a different singularity guard.
    #[must_use]
    pub fn with_singularity_guard(mut self, singularity_guard: Scalar) -> Self {
        self.singularity_guard = singularity_guard;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new(COULOMB_CONSTANT, SINGULARITY_GUARD)
    }
}

/// Field components and magnitude sampled on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSamples {
    /// x component of E.
    pub ex: Field2,
    /// y component of E.
    pub ey: Field2,
    /// `sqrt(ex² + ey²)` per sample.
    pub magnitude: Field2,
}

impl FieldSamples {
    /// `(rows, cols)` of every component.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.ex.shape()
    }

    /// Field vector at grid index `(row, col)`.
    #[must_use]
    pub fn vector(&self, row: usize, col: usize) -> R2 {
        R2::new(self.ex[(row, col)], self.ey[(row, col)])
    }

    /// Largest finite magnitude, or `None` for an empty grid.
    #[must_use]
    pub fn max_magnitude(&self) -> Option<Scalar> {
        self.magnitude.iter().copied().filter(|v| v.is_finite()).reduce(Scalar::max)
    }
}

#[inline]
fn magnitude_of(ex: Scalar, ey: Scalar) -> Scalar {
    (ex * ex + ey * ey).sqrt()
}

/// Contribution of `charge` at offset `(rx, ry)` from it, using `r³ + ε`.
#[inline]
fn contribution(charge: &PointCharge, rx: Scalar, ry: Scalar, config: &FieldConfig) -> (Scalar, Scalar) {
    let r = (rx * rx + ry * ry).sqrt();
    let r3 = r.powf(3.0) + config.singularity_guard;
    let kq = config.coulomb_constant * charge.charge;
    (kq * rx / r3, kq * ry / r3)
}

/// Electric field E at `point` due to `charges`, summed in slice order.
#[must_use]
pub fn electric_field_at(point: R2, charges: &[PointCharge], config: &FieldConfig) -> R2 {
    let mut e = R2::zeros();
    for c in charges {
        let (ex, ey) = contribution(c, point.x - c.x(), point.y - c.y(), config);
        e.x += ex;
        e.y += ey;
    }
    e
}

/// Electric field on arbitrary coordinate matrices `x`, `y` of equal shape.
///
/// # Panics
///
/// Panics if `x` and `y` differ in shape.
#[must_use]
pub fn electric_field_on_points(
    charges: &[PointCharge],
    x: &Field2,
    y: &Field2,
    config: &FieldConfig,
) -> FieldSamples {
    assert_eq!(x.shape(), y.shape(), "coordinate matrices must share a shape");
    let (rows, cols) = x.shape();
    let mut ex = Field2::zeros(rows, cols);
    let mut ey = Field2::zeros(rows, cols);

    // Charge-outer accumulation keeps the per-point summation in charge order.
    for c in charges {
        for ((ex_p, ey_p), (px, py)) in ex.iter_mut().zip(ey.iter_mut()).zip(x.iter().zip(y.iter())) {
            let (dx, dy) = contribution(c, px - c.x(), py - c.y(), config);
            *ex_p += dx;
            *ey_p += dy;
        }
    }

    let magnitude = ex.zip_map(&ey, magnitude_of);
    debug!("evaluated {} charges over {} points", charges.len(), rows * cols);
    FieldSamples { ex, ey, magnitude }
}

/// Electric field over every point of `grid`.
#[must_use]
pub fn electric_field_on_grid(charges: &[PointCharge], grid: &EvaluationGrid, config: &FieldConfig) -> FieldSamples {
    electric_field_on_points(charges, grid.x(), grid.y(), config)
}

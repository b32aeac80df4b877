//! Reference constants for the point-charge field demonstration.
//!
//! ## Units
//!
//! The values are SI-like and chosen for visual scale rather than physical
//! fidelity: charges are in arbitrary signed units and positions in arbitrary
//! length units. Only Coulomb's constant carries its SI magnitude.

/// Coulomb's constant _k_ = 1/(4πε₀), rounded to 8.9875 × 10⁹ N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.9875e9;
/// Additive guard ε applied to the cubed distance `r³ + ε` when dividing.
///
/// Keeps the field finite at a charge's own location.
pub const SINGULARITY_GUARD: f64 = 1.0e-10;
/// Spacing of the reference evaluation grid along both axes.
pub const GRID_STEP: f64 = 0.01;
/// Lower and upper bound of the reference domain on both axes.
pub const DOMAIN_BOUNDS: (f64, f64) = (-4.0, 4.0);
/// Suggested range for the coordinates of the interactively supplied charge.
///
/// Advisory only; nothing downstream enforces it.
pub const SUGGESTED_CHARGE_RANGE: (f64, f64) = (0.0, 2.0);

/// Magnitude, x and y of the fixed background charges, in index order.
pub const FIXED_CHARGES: [(f64, f64, f64); 2] = [(1.0, 1.0, 0.0), (-1.0, -1.0, 0.0)];

/// Returns `k q / r²`, the field magnitude of an isolated charge `q` at distance `r`.
#[inline]
#[must_use]
pub fn coulomb_field_magnitude(q: f64, r: f64) -> f64 {
    COULOMB_CONSTANT * q / (r * r)
}

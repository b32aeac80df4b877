//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{DMatrix, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors.
pub type R2 = Vector2<Scalar>;
/// Dense field sampled on a grid, indexed `(row, col)`: rows follow `y`, columns follow `x`.
pub type Field2 = DMatrix<Scalar>;

/// Bilinear interpolation of `field` at fractional index `(col, row)`.
///
/// Returns `None` when the position falls outside the sampled lattice.
#[must_use]
pub fn bilinear(field: &Field2, col: Scalar, row: Scalar) -> Option<Scalar> {
    let (rows, cols) = field.shape();
    if rows == 0 || cols == 0 || !col.is_finite() || !row.is_finite() {
        return None;
    }
    if col < 0.0 || row < 0.0 || col > (cols - 1) as Scalar || row > (rows - 1) as Scalar {
        return None;
    }
    let c0 = (col.floor() as usize).min(cols.saturating_sub(2));
    let r0 = (row.floor() as usize).min(rows.saturating_sub(2));
    let c1 = (c0 + 1).min(cols - 1);
    let r1 = (r0 + 1).min(rows - 1);
    let tx = col - c0 as Scalar;
    let ty = row - r0 as Scalar;

    let top = field[(r0, c0)] * (1.0 - tx) + field[(r0, c1)] * tx;
    let bottom = field[(r1, c0)] * (1.0 - tx) + field[(r1, c1)] * tx;
    Some(top * (1.0 - ty) + bottom * ty)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn bilinear_reproduces_plane() {
        // f(col, row) = 2 col + 3 row
        let field = Field2::from_fn(4, 5, |r, c| 2.0 * c as Scalar + 3.0 * r as Scalar);
        let v = bilinear(&field, 1.25, 2.5).unwrap();
        assert_relative_eq!(v, 2.0 * 1.25 + 3.0 * 2.5, epsilon = 1.0e-12);
        assert_relative_eq!(bilinear(&field, 4.0, 3.0).unwrap(), 17.0, epsilon = 1.0e-12);
    }

    #[test]
    fn bilinear_rejects_outside() {
        let field = Field2::zeros(3, 3);
        assert!(bilinear(&field, -0.1, 1.0).is_none());
        assert!(bilinear(&field, 1.0, 2.1).is_none());
        assert!(bilinear(&Field2::zeros(0, 0), 0.0, 0.0).is_none());
    }
}

//! Regular evaluation lattice over a rectangular domain.

use log::debug;

use crate::constants::{DOMAIN_BOUNDS, GRID_STEP};
use crate::math::{Field2, Scalar};

/// Largest number of samples accepted along one axis.
pub const MAX_AXIS_SAMPLES: usize = 100_000;
/// Largest total number of grid points accepted (25 times the reference grid).
pub const MAX_GRID_POINTS: usize = 16_000_000;

/// Errors raised while constructing an evaluation grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Raised when the step is zero, negative, or not finite.
    #[error("grid step must be positive and finite, got {0}")]
    InvalidStep(Scalar),
    /// Raised when an axis has `min > max` or a non-finite bound.
    #[error("invalid {axis} bounds [{min}, {max}]")]
    InvalidBounds {
        /// Axis name (`x` or `y`).
        axis: &'static str,
        /// Lower bound.
        min: Scalar,
        /// Upper bound.
        max: Scalar,
    },
    /// Raised when an axis would hold more than [`MAX_AXIS_SAMPLES`] samples.
    #[error("{axis} axis would hold {samples} samples, limit is {limit}")]
    TooManySamples {
        /// Axis name (`x` or `y`).
        axis: &'static str,
        /// Requested sample count, computed in floating point.
        samples: Scalar,
        /// Accepted maximum.
        limit: usize,
    },
    /// Raised when the grid would hold more than [`MAX_GRID_POINTS`] points.
    #[error("grid would hold {points} points, limit is {limit}")]
    TooManyPoints {
        /// Requested point count, computed in floating point.
        points: Scalar,
        /// Accepted maximum.
        limit: usize,
    },
}

/// Step size and axis bounds describing an evaluation grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Spacing between neighbouring samples on both axes.
    pub step: Scalar,
    /// Inclusive `(min, max)` bounds on the x axis.
    pub x_bounds: (Scalar, Scalar),
    /// Inclusive `(min, max)` bounds on the y axis.
    pub y_bounds: (Scalar, Scalar),
}

impl GridSpec {
    /// Creates a grid spec; call [`GridSpec::validate`] or
    /// [`EvaluationGrid::from_spec`] to check it.
    #[must_use]
    pub fn new(step: Scalar, x_bounds: (Scalar, Scalar), y_bounds: (Scalar, Scalar)) -> Self {
        Self { step, x_bounds, y_bounds }
    }

    /// Reference grid: step 0.01 over `[-4, 4]²` (801 × 801 samples).
    #[must_use]
    pub fn reference() -> Self {
        Self::new(GRID_STEP, DOMAIN_BOUNDS, DOMAIN_BOUNDS)
    }

    /// Checks the step, both axis bounds and the sample counts.
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(GridError::InvalidStep(self.step));
        }
        let mut points = 1.0;
        for (axis, (min, max)) in [("x", self.x_bounds), ("y", self.y_bounds)] {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(GridError::InvalidBounds { axis, min, max });
            }
            let samples = ((max - min) / self.step).round() + 1.0;
            if !(samples.is_finite() && samples <= MAX_AXIS_SAMPLES as Scalar) {
                return Err(GridError::TooManySamples { axis, samples, limit: MAX_AXIS_SAMPLES });
            }
            points *= samples;
        }
        if points > MAX_GRID_POINTS as Scalar {
            return Err(GridError::TooManyPoints { points, limit: MAX_GRID_POINTS });
        }
        Ok(())
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::reference()
    }
}

/// Generates `min, min + step, ...` up to and including `max`.
///
/// The sample count is `round((max - min) / step) + 1`, so an endpoint that
/// lands on the lattice up to rounding noise is kept and never duplicated.
/// Returns an empty axis when the count does not fit in a `usize`.
#[must_use]
pub fn axis_samples(min: Scalar, max: Scalar, step: Scalar) -> Vec<Scalar> {
    if !(step > 0.0) || max < min {
        return Vec::new();
    }
    let Some(n) = (((max - min) / step).round() as usize).checked_add(1) else {
        return Vec::new();
    };
    (0..n).map(|i| min + step * i as Scalar).collect()
}

/// Coordinate matrices of a regular 2D lattice (meshgrid, `xy` indexing).
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationGrid {
    spec: GridSpec,
    x_axis: Vec<Scalar>,
    y_axis: Vec<Scalar>,
    x: Field2,
    y: Field2,
}

impl EvaluationGrid {
    /// Builds the grid described by `spec`.
    pub fn from_spec(spec: &GridSpec) -> Result<Self, GridError> {
        spec.validate()?;
        let x_axis = axis_samples(spec.x_bounds.0, spec.x_bounds.1, spec.step);
        let y_axis = axis_samples(spec.y_bounds.0, spec.y_bounds.1, spec.step);
        let (rows, cols) = (y_axis.len(), x_axis.len());
        let x = Field2::from_fn(rows, cols, |_, c| x_axis[c]);
        let y = Field2::from_fn(rows, cols, |r, _| y_axis[r]);
        debug!("built {rows}x{cols} evaluation grid with step {}", spec.step);
        Ok(Self { spec: *spec, x_axis, y_axis, x, y })
    }

    /// Spec the grid was built from.
    #[must_use]
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// `(rows, cols)`: rows follow the y axis, columns the x axis.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// Total number of sample points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if the grid holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Distinct x coordinates, ascending.
    #[must_use]
    pub fn x_axis(&self) -> &[Scalar] {
        &self.x_axis
    }

    /// Distinct y coordinates, ascending.
    #[must_use]
    pub fn y_axis(&self) -> &[Scalar] {
        &self.y_axis
    }

    /// x coordinate of every grid point.
    #[must_use]
    pub fn x(&self) -> &Field2 {
        &self.x
    }

    /// y coordinate of every grid point.
    #[must_use]
    pub fn y(&self) -> &Field2 {
        &self.y
    }

    /// Maps a physical position to fractional `(col, row)` indices.
    #[must_use]
    pub fn fractional_index(&self, x: Scalar, y: Scalar) -> (Scalar, Scalar) {
        (
            (x - self.spec.x_bounds.0) / self.spec.step,
            (y - self.spec.y_bounds.0) / self.spec.step,
        )
    }

    /// True when `(x, y)` lies within the sampled extent.
    #[must_use]
    pub fn contains(&self, x: Scalar, y: Scalar) -> bool {
        match (self.x_axis.first(), self.x_axis.last(), self.y_axis.first(), self.y_axis.last()) {
            (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) => x >= x0 && x <= x1 && y >= y0 && y <= y1,
            _ => false,
        }
    }
}

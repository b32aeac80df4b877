//! Field-line tracing through a sampled field.
//!
//! Lines are integrated with RK4 along the unit field direction, so the step
//! length is a fixed arc length regardless of how strong the field is. A
//! coarse occupancy mask keeps lines from piling up on top of each other.

use log::debug;

use crate::fields::charge::PointCharge;
use crate::fields::electrostatic::FieldSamples;
use crate::fields::grid::EvaluationGrid;
use crate::math::{bilinear, R2, Scalar};

/// Tuning knobs for [`trace_streamlines`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamlineOptions {
    /// Seeds per axis on the regular seeding lattice.
    pub seeds_per_axis: usize,
    /// Cells per axis of the occupancy mask.
    pub mask_resolution: usize,
    /// Arc-length step as a multiple of the grid step.
    pub step_factor: Scalar,
    /// Cap on integration steps in each direction.
    pub max_steps: usize,
    /// Lines stop once they come this close to a charge.
    pub charge_exclusion_radius: Scalar,
}

impl Default for StreamlineOptions {
    fn default() -> Self {
        Self {
            seeds_per_axis: 16,
            mask_resolution: 30,
            step_factor: 2.0,
            max_steps: 2_000,
            charge_exclusion_radius: 0.05,
        }
    }
}

/// Polyline tangent to the field everywhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Streamline {
    /// Ordered points, from the backward end to the forward end.
    pub points: Vec<R2>,
}

impl Streamline {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the line has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

struct OccupancyMask {
    cells: Vec<Option<usize>>,
    resolution: usize,
    origin: R2,
    extent: R2,
}

impl OccupancyMask {
    fn new(grid: &EvaluationGrid, resolution: usize) -> Self {
        let spec = grid.spec();
        let resolution = resolution.max(1);
        Self {
            cells: vec![None; resolution * resolution],
            resolution,
            origin: R2::new(spec.x_bounds.0, spec.y_bounds.0),
            extent: R2::new(spec.x_bounds.1 - spec.x_bounds.0, spec.y_bounds.1 - spec.y_bounds.0),
        }
    }

    fn cell(&self, p: R2) -> usize {
        let axis = |v: Scalar, o: Scalar, e: Scalar| {
            if e > 0.0 {
                (((v - o) / e * self.resolution as Scalar) as usize).min(self.resolution - 1)
            } else {
                0
            }
        };
        axis(p.y, self.origin.y, self.extent.y) * self.resolution + axis(p.x, self.origin.x, self.extent.x)
    }

    /// Claims the cell under `p` for `line`; false if another line owns it.
    fn claim(&mut self, p: R2, line: usize) -> bool {
        let idx = self.cell(p);
        match self.cells[idx] {
            Some(owner) if owner != line => false,
            _ => {
                self.cells[idx] = Some(line);
                true
            }
        }
    }

    fn is_free(&self, p: R2) -> bool {
        self.cells[self.cell(p)].is_none()
    }
}

struct Tracer<'a> {
    field: &'a FieldSamples,
    grid: &'a EvaluationGrid,
    charges: &'a [PointCharge],
    options: &'a StreamlineOptions,
    step: Scalar,
}

impl Tracer<'_> {
    /// Unit field direction at `p`, or `None` outside the grid or at a null point.
    fn direction(&self, p: R2) -> Option<R2> {
        if !self.grid.contains(p.x, p.y) {
            return None;
        }
        let (col, row) = self.grid.fractional_index(p.x, p.y);
        let e = R2::new(bilinear(&self.field.ex, col, row)?, bilinear(&self.field.ey, col, row)?);
        let norm = e.norm();
        (norm.is_finite() && norm > 0.0).then(|| e / norm)
    }

    fn near_charge(&self, p: R2) -> bool {
        self.charges
            .iter()
            .any(|c| (p - c.position).norm() < self.options.charge_exclusion_radius)
    }

    fn rk4_step(&self, p: R2, ds: Scalar) -> Option<R2> {
        let k1 = self.direction(p)?;
        let k2 = self.direction(p + k1 * (ds / 2.0))?;
        let k3 = self.direction(p + k2 * (ds / 2.0))?;
        let k4 = self.direction(p + k3 * ds)?;
        Some(p + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (ds / 6.0))
    }

    /// Integrates from `seed` in direction `sign`, excluding the seed itself.
    fn integrate(&self, seed: R2, sign: Scalar, line: usize, mask: &mut OccupancyMask) -> Vec<R2> {
        let mut points = Vec::new();
        let mut p = seed;
        for _ in 0..self.options.max_steps {
            let Some(next) = self.rk4_step(p, sign * self.step) else { break };
            if !self.grid.contains(next.x, next.y) || !mask.claim(next, line) {
                break;
            }
            points.push(next);
            if self.near_charge(next) {
                break;
            }
            p = next;
        }
        points
    }
}

/// Traces field lines through `field` sampled on `grid`.
///
/// Seeds sit at the cell centres of a regular lattice; each seed is
/// integrated forward and backward until the line leaves the grid, hits a
/// null point, reaches a charge, runs into another line, or exhausts
/// `max_steps`. Lines with fewer than two points are dropped.
#[must_use]
pub fn trace_streamlines(
    field: &FieldSamples,
    grid: &EvaluationGrid,
    charges: &[PointCharge],
    options: &StreamlineOptions,
) -> Vec<Streamline> {
    if grid.is_empty() || field.shape() != grid.shape() {
        return Vec::new();
    }
    let spec = grid.spec();
    let tracer = Tracer { field, grid, charges, options, step: spec.step * options.step_factor };
    let mut mask = OccupancyMask::new(grid, options.mask_resolution);

    let n = options.seeds_per_axis.max(1);
    let dx = (spec.x_bounds.1 - spec.x_bounds.0) / n as Scalar;
    let dy = (spec.y_bounds.1 - spec.y_bounds.0) / n as Scalar;

    let mut lines = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let seed = R2::new(
                spec.x_bounds.0 + (i as Scalar + 0.5) * dx,
                spec.y_bounds.0 + (j as Scalar + 0.5) * dy,
            );
            if !mask.is_free(seed) || tracer.near_charge(seed) || tracer.direction(seed).is_none() {
                continue;
            }
            let id = lines.len();
            mask.claim(seed, id);
            let mut backward = tracer.integrate(seed, -1.0, id, &mut mask);
            let forward = tracer.integrate(seed, 1.0, id, &mut mask);
            backward.reverse();
            backward.push(seed);
            backward.extend(forward);
            if backward.len() >= 2 {
                lines.push(Streamline { points: backward });
            }
        }
    }
    debug!("traced {} streamlines from {} seeds", lines.len(), n * n);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::charge::fixed_charges;
    use crate::fields::electrostatic::{electric_field_on_grid, FieldConfig};
    use crate::fields::grid::GridSpec;

    fn coarse_grid() -> EvaluationGrid {
        EvaluationGrid::from_spec(&GridSpec::new(0.05, (-4.0, 4.0), (-4.0, 4.0))).unwrap()
    }

    #[test]
    fn dipole_lines_stay_inside_domain() {
        let grid = coarse_grid();
        let charges = fixed_charges();
        let field = electric_field_on_grid(&charges, &grid, &FieldConfig::default());
        let lines = trace_streamlines(&field, &grid, &charges, &StreamlineOptions::default());
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.len() >= 2);
            assert!(line.points.iter().all(|p| grid.contains(p.x, p.y)));
        }
    }

    #[test]
    fn lines_around_single_charge_are_radial() {
        let grid = coarse_grid();
        let charges = [PointCharge::new(1.0, 0.0, 0.0)];
        let field = electric_field_on_grid(&charges, &grid, &FieldConfig::default());
        let lines = trace_streamlines(&field, &grid, &charges, &StreamlineOptions::default());
        assert!(!lines.is_empty());
        for line in &lines {
            for pair in line.points.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                // Interpolation error dominates within a few cells of the charge.
                if a.norm() < 0.5 {
                    continue;
                }
                let step = b - a;
                // Step direction is parallel to the position vector.
                let cross = a.x * step.y - a.y * step.x;
                assert!(cross.abs() <= 0.05 * a.norm() * step.norm() + 1.0e-9);
            }
        }
    }

    #[test]
    fn zero_field_yields_no_lines() {
        let grid = coarse_grid();
        let field = electric_field_on_grid(&[], &grid, &FieldConfig::default());
        assert!(trace_streamlines(&field, &grid, &[], &StreamlineOptions::default()).is_empty());
    }
}

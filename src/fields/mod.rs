//! Point charges, evaluation grids and the Coulomb field evaluator.

mod charge;
mod electrostatic;
mod grid;
mod streamline;

pub use charge::{charge_range, fixed_charges, PointCharge};
pub use electrostatic::{
    electric_field_at,
    electric_field_on_grid,
    electric_field_on_points,
    FieldConfig,
    FieldSamples,
};
pub use grid::{axis_samples, EvaluationGrid, GridError, GridSpec, MAX_AXIS_SAMPLES, MAX_GRID_POINTS};
pub use streamline::{trace_streamlines, Streamline, StreamlineOptions};

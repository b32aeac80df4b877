//! Convenience re-exports for building point-charge field experiments.

pub use crate::constants::*;
pub use crate::errors::ChargeFieldError;
pub use crate::fields::{
    axis_samples,
    charge_range,
    electric_field_at,
    electric_field_on_grid,
    electric_field_on_points,
    fixed_charges,
    trace_streamlines,
    EvaluationGrid,
    FieldConfig,
    FieldSamples,
    GridError,
    GridSpec,
    PointCharge,
    Streamline,
    StreamlineOptions,
};
pub use crate::io::{prompt_scalar, read_charge, InputError};
pub use crate::math::{bilinear, Field2, Scalar, R2};
pub use crate::render::{render_figure, FigureOptions, RenderError};
pub use crate::simulation::{SimulationConfig, SimulationError, SimulationOutput};

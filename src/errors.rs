//! Shared error types used across submodules.

use thiserror::Error;

use crate::fields::GridError;
use crate::io::InputError;
use crate::render::RenderError;
use crate::simulation::SimulationError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum ChargeFieldError {
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Wraps evaluation grid construction errors.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Wraps interactive input errors.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Wraps figure rendering errors.
    #[error(transparent)]
    Render(#[from] RenderError),
}

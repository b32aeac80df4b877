//! Run orchestration: charge set, grid and constants bundled into one configuration.

use log::{debug, info};

use crate::fields::{
    electric_field_on_grid, fixed_charges, EvaluationGrid, FieldConfig, FieldSamples, GridError, GridSpec,
    PointCharge,
};

/// Metadata and inputs describing one field evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Constants of the Coulomb superposition.
    pub field: FieldConfig,
    /// Evaluation grid.
    pub grid: GridSpec,
    /// Charges present in every run, ahead of any supplied per run.
    pub fixed_charges: Vec<PointCharge>,
}

impl SimulationConfig {
    /// Reference configuration: default constants, 801 × 801 grid over `[-4, 4]²`
    /// and the fixed dipole.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: FieldConfig::default(),
            grid: GridSpec::reference(),
            fixed_charges: fixed_charges(),
        }
    }

    /// Replaces the grid spec.
    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Replaces the field constants.
    #[must_use]
    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    /// Checks the constants and grid spec.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let FieldConfig { coulomb_constant, singularity_guard } = self.field;
        if !coulomb_constant.is_finite() {
            return Err(SimulationError::InvalidConfig(format!("coulomb constant {coulomb_constant} is not finite")));
        }
        // A zero guard turns the self-term at a charge into 0 / 0.
        if !(singularity_guard.is_finite() && singularity_guard > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "singularity guard {singularity_guard} must be finite and positive"
            )));
        }
        self.grid.validate()?;
        Ok(())
    }

    /// Evaluates the field of the fixed charges followed by `extra`, in that order.
    pub fn run(&self, extra: &[PointCharge]) -> Result<SimulationOutput, SimulationError> {
        self.validate()?;
        let charges: Vec<PointCharge> = self.fixed_charges.iter().chain(extra).copied().collect();
        if let Some(index) = charges
            .iter()
            .position(|c| !(c.charge.is_finite() && c.position.iter().all(|v| v.is_finite())))
        {
            return Err(SimulationError::InvalidCharge { index: index + 1 });
        }

        let grid = EvaluationGrid::from_spec(&self.grid)?;
        info!("{}: evaluating {} charges on a {:?} grid", self.name, charges.len(), grid.shape());
        let field = electric_field_on_grid(&charges, &grid, &self.field);
        debug!("{}: peak |E| = {:?}", self.name, field.max_magnitude());
        Ok(SimulationOutput { charges, grid, field })
    }
}

/// Charges, grid and sampled field of a completed run.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    /// Charges in evaluation order.
    pub charges: Vec<PointCharge>,
    /// Grid the field was sampled on.
    pub grid: EvaluationGrid,
    /// Sampled field.
    pub field: FieldSamples,
}

/// Errors that can occur while configuring or executing a run.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Raised when the grid spec is invalid.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Raised when the constants are internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    /// Raised when a charge has a non-finite magnitude or coordinate (1-based index).
    #[error("charge q{index} has a non-finite magnitude or position")]
    InvalidCharge {
        /// One-based position in evaluation order.
        index: usize,
    },
}

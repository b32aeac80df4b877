#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Reference constants: Coulomb's constant, singularity guard, grid and domain.
pub mod constants;
/// Shared numerical aliases and interpolation.
pub mod math;
/// Point charges, evaluation grids, the field evaluator and streamlines.
pub mod fields;
/// Interactive terminal input.
pub mod io;
/// Figure rendering.
pub mod render;
/// Run orchestration and configuration.
pub mod simulation;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

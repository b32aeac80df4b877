//! Terminal I/O helpers.

pub mod prompt;

pub use prompt::{prompt_scalar, read_charge, InputError};

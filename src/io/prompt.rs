//! Interactive acquisition of the user-supplied charge.
//!
//! Reads from any `BufRead` and writes prompts to any `Write`, so the
//! terminal is only one possible source.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::constants::SUGGESTED_CHARGE_RANGE;
use crate::fields::PointCharge;
use crate::math::Scalar;

/// Errors raised while reading the interactive charge.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Raised when reading from or writing to the terminal fails.
    #[error("i/o error while reading {field}: {source}")]
    Io {
        /// Quantity being read.
        field: &'static str,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Raised when input ends before all quantities are read.
    #[error("unexpected end of input while reading {0}")]
    EndOfInput(&'static str),
    /// Raised when an entry is not a number.
    #[error("invalid {field}: {text:?} is not a number")]
    NotANumber {
        /// Quantity being read.
        field: &'static str,
        /// Offending entry, trimmed.
        text: String,
    },
}

/// Writes `prompt`, then reads one line and parses it as a number.
pub fn prompt_scalar<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &'static str,
    prompt: &str,
) -> Result<Scalar, InputError> {
    let io_err = |source| InputError::Io { field, source };
    write!(output, "{prompt}").map_err(io_err)?;
    output.flush().map_err(io_err)?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(io_err)? == 0 {
        return Err(InputError::EndOfInput(field));
    }
    let text = line.trim();
    text.parse::<Scalar>().map_err(|_| InputError::NotANumber { field, text: text.to_owned() })
}

/// Prompts for the third charge: x, then y, then magnitude.
///
/// Coordinates outside the suggested range are accepted with a warning.
pub fn read_charge<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PointCharge, InputError> {
    let (lo, hi) = SUGGESTED_CHARGE_RANGE;
    let x = prompt_scalar(input, output, "x coordinate", &format!("Enter x-coordinate of the third particle ({lo} to {hi}): "))?;
    let y = prompt_scalar(input, output, "y coordinate", &format!("Enter y-coordinate of the third particle ({lo} to {hi}): "))?;
    let q = prompt_scalar(input, output, "charge", "Enter charge of the third particle (positive or negative): ")?;

    for (axis, v) in [("x", x), ("y", y)] {
        if !(lo..=hi).contains(&v) {
            warn!("third charge {axis} = {v} lies outside the suggested range [{lo}, {hi}]");
        }
    }
    Ok(PointCharge::new(q, x, y))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_three_values_in_order() {
        let mut input = Cursor::new("0.5\n 1.25 \n-2\n");
        let mut output = Vec::new();
        let charge = read_charge(&mut input, &mut output).unwrap();
        assert_eq!(charge, PointCharge::new(-2.0, 0.5, 1.25));
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Enter x-coordinate of the third particle (0 to 2): "));
        assert!(shown.contains("Enter charge of the third particle"));
    }

    #[test]
    fn accepts_values_outside_suggested_range() {
        let mut input = Cursor::new("3.5\n-7\n1e-3\n");
        let charge = read_charge(&mut input, &mut io::sink()).unwrap();
        assert_eq!(charge, PointCharge::new(1.0e-3, 3.5, -7.0));
    }

    #[test]
    fn rejects_non_numeric_entry() {
        let mut input = Cursor::new("1\nabc\n2\n");
        let err = read_charge(&mut input, &mut io::sink()).unwrap_err();
        match err {
            InputError::NotANumber { field, text } => {
                assert_eq!(field, "y coordinate");
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_premature_end_of_input() {
        let mut input = Cursor::new("1\n2\n");
        let err = read_charge(&mut input, &mut io::sink()).unwrap_err();
        assert!(matches!(err, InputError::EndOfInput("charge")));
    }
}

//! Terminal form for the calculator.
//!
//! Used when stdin is a terminal. Prompts for the two inputs, enforces the
//! form bounds (speed at least 0, angle between 0 and 90) and prints the
//! same text the MCP tool returns, or the JSON report with `--json`.
//! An empty entry or EOF ends the session.

use std::io::{self, BufRead, Write};

use crate::projectile::{compute_projectile_distance, projectile_report};

/// Heading printed when the session starts.
pub const TITLE: &str = "Projectile Distance Calculator";

struct Field {
    label: &'static str,
    min: f64,
    max: Option<f64>,
}

const SPEED: Field = Field {
    label: "Initial Speed (m/s)",
    min: 0.0,
    max: None,
};

const ANGLE: Field = Field {
    label: "Launch Angle (degrees)",
    min: 0.0,
    max: Some(90.0),
};

impl Field {
    fn parse(&self, entry: &str) -> Result<f64, String> {
        let value: f64 = entry
            .parse()
            .map_err(|_| format!("'{entry}' is not a number"))?;

        let in_range =
            value.is_finite() && value >= self.min && self.max.is_none_or(|max| value <= max);

        if in_range {
            Ok(value)
        } else {
            Err(match self.max {
                Some(max) => format!("{} must be between {} and {max}", self.label, self.min),
                None => format!("{} must be at least {}", self.label, self.min),
            })
        }
    }
}

/// Runs the prompt loop until an empty entry or EOF.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_prompt<R: BufRead, W: Write>(mut input: R, mut output: W, json: bool) -> io::Result<()> {
    writeln!(output, "{TITLE}")?;

    loop {
        let Some(speed) = prompt(&mut input, &mut output, &SPEED)? else {
            break;
        };
        let Some(angle) = prompt(&mut input, &mut output, &ANGLE)? else {
            break;
        };

        if json {
            writeln!(output, "{}", projectile_report(speed, angle))?;
        } else {
            writeln!(output, "{}", compute_projectile_distance(speed, angle))?;
        }
    }

    output.flush()
}

/// Asks for one field until a valid value arrives. `None` ends the session.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &Field,
) -> io::Result<Option<f64>> {
    loop {
        write!(output, "{}: ", field.label)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        let entry = line.trim();
        if entry.is_empty() {
            return Ok(None);
        }

        match field.parse(entry) {
            Ok(value) => return Ok(Some(value)),
            Err(message) => writeln!(output, "{message}")?,
        }
    }
}

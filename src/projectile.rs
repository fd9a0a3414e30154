//! Projectile range calculation.
//!
//! Horizontal distance travelled on flat ground with no drag:
//!
//! ```text
//! distance = v² · sin(2θ) / g
//! ```
//!
//! The calculation itself never fails for finite inputs that do not overflow.
//! Callers that want an error *value* rather than a `Result` use
//! [`compute_projectile_distance`] (text) or [`projectile_report`] (JSON).

use serde_json::{json, Value};

use crate::error::ProjectileError;

/// Standard gravitational acceleration in m/s².
pub const GRAVITY: f64 = 9.81;

/// Initial speed used when a tool call omits `initial_speed`.
pub const DEFAULT_INITIAL_SPEED: f64 = 0.0;

/// Launch angle used when a tool call omits `angle`.
pub const DEFAULT_ANGLE: f64 = 45.0;

/// Computes the horizontal range in metres.
///
/// `angle` is in degrees. No range check is applied to either input: angles
/// outside `[0, 90]` yield the mathematically consistent (possibly negative)
/// distance.
///
/// # Errors
///
/// Returns an error if either input is NaN or infinite, or if the result
/// overflows.
pub fn calculate_projectile(initial_speed: f64, angle: f64) -> Result<f64, ProjectileError> {
    ensure_finite("initial_speed", initial_speed)?;
    ensure_finite("angle", angle)?;

    let distance = initial_speed.powi(2) * (2.0 * angle.to_radians()).sin() / GRAVITY;

    if distance.is_finite() {
        Ok(distance)
    } else {
        Err(ProjectileError::NonFiniteResult {
            initial_speed,
            angle,
        })
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), ProjectileError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectileError::NonFiniteInput { field, value })
    }
}

/// Arguments of the `calculate_projectile` tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileArgs {
    /// Initial speed in m/s.
    pub initial_speed: f64,
    /// Launch angle in degrees.
    pub angle: f64,
}

impl Default for ProjectileArgs {
    fn default() -> Self {
        Self {
            initial_speed: DEFAULT_INITIAL_SPEED,
            angle: DEFAULT_ANGLE,
        }
    }
}

impl ProjectileArgs {
    /// Extracts the arguments from a JSON `arguments` object.
    ///
    /// Missing fields take their defaults. A non-object value is treated as
    /// an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectileError::NotANumber`] if a field is present but is
    /// not a JSON number (including `null`).
    pub fn from_arguments(arguments: &Value) -> Result<Self, ProjectileError> {
        Ok(Self {
            initial_speed: number_or(arguments, "initial_speed", DEFAULT_INITIAL_SPEED)?,
            angle: number_or(arguments, "angle", DEFAULT_ANGLE)?,
        })
    }

    /// Computes the distance for these arguments.
    ///
    /// # Errors
    ///
    /// See [`calculate_projectile`].
    pub fn distance(self) -> Result<f64, ProjectileError> {
        calculate_projectile(self.initial_speed, self.angle)
    }
}

fn number_or(arguments: &Value, field: &'static str, default: f64) -> Result<f64, ProjectileError> {
    arguments.get(field).map_or(Ok(default), |value| {
        value.as_f64().ok_or(ProjectileError::NotANumber { field })
    })
}

/// Formats a calculation outcome the way every text surface reports it.
#[must_use]
pub fn distance_text(outcome: &Result<f64, ProjectileError>) -> String {
    match outcome {
        Ok(distance) => format!("Distance: {distance:.2} meters"),
        Err(e) => format!("Error: {e}"),
    }
}

/// Direct-call entry point used by the form UI: never fails, errors become text.
#[must_use]
pub fn compute_projectile_distance(initial_speed: f64, angle: f64) -> String {
    distance_text(&calculate_projectile(initial_speed, angle))
}

/// JSON report variant of [`compute_projectile_distance`].
///
/// `{"status":"success","result":..,"units":"meters"}` on success,
/// `{"status":"error","message":..}` otherwise.
#[must_use]
pub fn projectile_report(initial_speed: f64, angle: f64) -> Value {
    match calculate_projectile(initial_speed, angle) {
        Ok(distance) => json!({
            "status": "success",
            "result": distance,
            "units": "meters",
        }),
        Err(e) => json!({
            "status": "error",
            "message": e.to_string(),
        }),
    }
}

//! A module for aggregating raw shaft parameters into an immutable calculation record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted value for the geometric fields (diameters, length, notch radius), in mm.
pub const MIN_DIMENSION: f64 = 0.1;
/// Smallest accepted value for the material strength fields (UTS, Sy), in MPa.
pub const MIN_STRENGTH: f64 = 100.0;

/// Represents an error that can occur while building an `InputRecord`.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// A raw field is out of its declared range. Recoverable by correcting the input;
    /// the presentation layer surfaces this as a form validation message.
    InvalidInput {
        field: &'static str,
        message: String,
    },
    /// A derived quantity left the domain of a formula (e.g. square root of a
    /// non-positive notch ratio).
    Domain { message: String },
}

impl InputError {
    fn invalid(field: &'static str, message: String) -> InputError {
        InputError::InvalidInput { field, message }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::InvalidInput { field, message } => {
                write!(f, "invalid input for '{}': {}", field, message)
            }
            InputError::Domain { message } => write!(f, "domain error: {}", message),
        }
    }
}

impl std::error::Error for InputError {}

/// The raw named numeric fields of one calculation request.
///
/// Units are fixed throughout: dimensions in mm, loads in N, strengths in MPa.
/// The surface factor coefficients `a` and `b` are dimensionless; `b` is
/// typically negative (Marin surface-condition fit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaftInputs {
    /// Larger step diameter of the shaft.
    pub da: f64,
    /// Smaller step diameter of the shaft (the notched section under analysis).
    pub db: f64,
    /// Shaft length between supports.
    pub l: f64,
    /// Fillet radius at the shoulder.
    pub r: f64,
    /// Distance of load Fa from the reference end.
    pub lfa: f64,
    /// Distance of load Fb from the reference end.
    pub lfb: f64,
    /// Applied load Fa. Any sign.
    pub fa: f64,
    /// Applied load Fb. Any sign.
    pub fb: f64,
    /// Ultimate tensile strength.
    pub uts: f64,
    /// Yield strength.
    pub sy: f64,
    /// Surface factor coefficient.
    pub a: f64,
    /// Surface factor exponent.
    pub b: f64,
}

impl Default for ShaftInputs {
    /// The canonical worked example shown to the user as initial widget values.
    fn default() -> Self {
        ShaftInputs {
            da: 38.0,
            db: 32.0,
            l: 550.0,
            r: 3.0,
            lfa: 225.0,
            lfb: 300.0,
            fa: 1000.0,
            fb: 1500.0,
            uts: 690.0,
            sy: 490.0,
            a: 4.51,
            b: -0.265,
        }
    }
}

impl ShaftInputs {
    /// Validates the raw fields against their declared minimums.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if every field is within its physically valid range.
    /// Otherwise returns an `InputError::InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<(), InputError> {
        for (field, value) in [
            ("da", self.da),
            ("db", self.db),
            ("l", self.l),
            ("r", self.r),
        ] {
            if value < MIN_DIMENSION {
                return Err(InputError::invalid(
                    field,
                    format!("must be at least {} mm, got {}", MIN_DIMENSION, value),
                ));
            }
        }
        for (field, value) in [("lfa", self.lfa), ("lfb", self.lfb)] {
            if value < 0.0 {
                return Err(InputError::invalid(
                    field,
                    format!("must not be negative, got {}", value),
                ));
            }
        }
        for (field, value) in [("uts", self.uts), ("sy", self.sy)] {
            if value < MIN_STRENGTH {
                return Err(InputError::invalid(
                    field,
                    format!("must be at least {} MPa, got {}", MIN_STRENGTH, value),
                ));
            }
        }
        if self.a <= 0.0 {
            return Err(InputError::invalid(
                "a",
                format!("must be greater than 0.0, got {}", self.a),
            ));
        }
        Ok(())
    }
}

/// Immutable snapshot of one calculation request, with the derived geometry
/// already folded in.
///
/// Rebuilt in full on every input change; there is no identity beyond the
/// latest input set of the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRecord {
    pub da: f64,
    pub db: f64,
    pub l: f64,
    pub r: f64,
    pub lfa: f64,
    pub lfb: f64,
    pub fa: f64,
    pub fb: f64,
    pub uts: f64,
    pub sy: f64,
    pub a: f64,
    pub b: f64,
    /// Step ratio Da/Db.
    pub dd_ratio: f64,
    /// Notch ratio r/Db.
    pub rd_ratio: f64,
    /// Theoretical stress concentration factor at the shoulder.
    pub kt: f64,
}

impl InputRecord {
    /// Builds an `InputRecord` from the raw fields.
    ///
    /// The theoretical stress concentration factor is a closed-form stand-in
    /// for the stepped-shaft Kt chart, which is presented to the user for
    /// manual lookup and deliberately not digitized:
    ///
    /// ```text
    /// Kt = 1 + 0.5 * (Da/Db - 1) * (1 + 1/sqrt(r/Db))
    /// ```
    ///
    /// # Returns
    ///
    /// Returns `Ok(InputRecord)` on success. Returns `InputError::InvalidInput`
    /// if a raw field violates its minimum, or `InputError::Domain` if the
    /// notch ratio is not positive (square root undefined).
    ///
    /// # Examples
    ///
    /// ```
    /// use shaft_fatigue::input::{InputRecord, ShaftInputs};
    ///
    /// let record = InputRecord::build(&ShaftInputs::default()).unwrap();
    /// assert!(record.kt > 1.0);
    /// ```
    pub fn build(raw: &ShaftInputs) -> Result<InputRecord, InputError> {
        raw.validate()?;
        let dd_ratio = raw.da / raw.db;
        let rd_ratio = raw.r / raw.db;
        if rd_ratio <= 0.0 {
            return Err(InputError::Domain {
                message: format!("notch ratio r/Db must be positive, got {}", rd_ratio),
            });
        }
        let kt = 1.0 + 0.5 * (dd_ratio - 1.0) * (1.0 + 1.0 / rd_ratio.sqrt());
        Ok(InputRecord {
            da: raw.da,
            db: raw.db,
            l: raw.l,
            r: raw.r,
            lfa: raw.lfa,
            lfb: raw.lfb,
            fa: raw.fa,
            fb: raw.fb,
            uts: raw.uts,
            sy: raw.sy,
            a: raw.a,
            b: raw.b,
            dd_ratio,
            rd_ratio,
            kt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_build_default_inputs() {
        let record = InputRecord::build(&ShaftInputs::default()).expect("default inputs must build");
        assert_relative_eq!(record.dd_ratio, 1.1875, max_relative = 1e-12);
        assert_relative_eq!(record.rd_ratio, 0.09375, max_relative = 1e-12);
        // Independent recomputation of the stand-in Kt formula.
        let expected_kt = 1.0 + 0.5 * (1.1875 - 1.0) * (1.0 + 1.0 / 0.09375_f64.sqrt());
        assert_relative_eq!(record.kt, expected_kt, max_relative = 1e-12);
    }

    #[test]
    fn test_validate_rejects_small_dimensions() {
        for field in ["da", "db", "l", "r"] {
            let mut raw = ShaftInputs::default();
            match field {
                "da" => raw.da = 0.05,
                "db" => raw.db = 0.05,
                "l" => raw.l = 0.0,
                "r" => raw.r = -1.0,
                _ => unreachable!(),
            }
            let err = ShaftInputs::validate(&raw).expect_err("expected a validation error");
            assert!(matches!(err, InputError::InvalidInput { field: f, .. } if f == field));
        }
    }

    #[test]
    fn test_validate_rejects_negative_load_positions() {
        let raw = ShaftInputs {
            lfa: -1.0,
            ..ShaftInputs::default()
        };
        assert!(raw.validate().is_err());
        let raw = ShaftInputs {
            lfb: -0.001,
            ..ShaftInputs::default()
        };
        assert!(raw.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_weak_materials_and_bad_surface_coefficient() {
        let raw = ShaftInputs {
            uts: 99.9,
            ..ShaftInputs::default()
        };
        assert!(raw.validate().is_err());
        let raw = ShaftInputs {
            sy: 10.0,
            ..ShaftInputs::default()
        };
        assert!(raw.validate().is_err());
        let raw = ShaftInputs {
            a: 0.0,
            ..ShaftInputs::default()
        };
        assert!(raw.validate().is_err());
    }

    #[test]
    fn test_loads_accept_any_sign() {
        let raw = ShaftInputs {
            fa: -1000.0,
            fb: -1500.0,
            ..ShaftInputs::default()
        };
        assert!(InputRecord::build(&raw).is_ok());
    }

    #[test]
    fn test_boundary_values_are_accepted() {
        let raw = ShaftInputs {
            da: MIN_DIMENSION,
            db: MIN_DIMENSION,
            l: MIN_DIMENSION,
            r: MIN_DIMENSION,
            lfa: 0.0,
            lfb: 0.0,
            uts: MIN_STRENGTH,
            sy: MIN_STRENGTH,
            ..ShaftInputs::default()
        };
        assert!(InputRecord::build(&raw).is_ok());
    }
}

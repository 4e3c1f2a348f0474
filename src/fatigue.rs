//! A module for the fatigue calculation pipeline of a stepped circular shaft.
//!
//! Turns an [`InputRecord`] into a [`ResultRecord`] of derived fatigue
//! quantities. Fields whose formula precondition does not hold come back as
//! `None` rather than an error; that is a legitimate non-computable state,
//! not a failure, and is kept distinguishable from NaN produced by the
//! arithmetic itself.

use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

use crate::input::InputRecord;

/// Lower bound of the Neuber constant fit, in MPa.
const NEUBER_UTS_MIN: f64 = 340.0;
/// Upper bound of the Neuber constant fit, in MPa.
const NEUBER_UTS_MAX: f64 = 1700.0;

/// Derived fatigue quantities for one input snapshot.
///
/// Depends only on the `InputRecord` it was calculated from and is rebuilt in
/// full on every input change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Uncorrected endurance limit Se' = 0.5 * UTS, MPa.
    pub se_prime: f64,
    /// Surface-condition factor ka = a * UTS^b.
    pub ka: f64,
    /// Size factor kb, piecewise on Da.
    pub kb: f64,
    /// Corrected endurance limit Se = ka * kb * Se', MPa.
    pub se: f64,
    /// Neuber's constant, defined only for 340 <= UTS <= 1700 MPa.
    pub neuber_constant: Option<f64>,
    /// Fatigue stress concentration factor, defined only when the Neuber
    /// constant is.
    pub kf: Option<f64>,
    /// Bending moment at the analyzed section, N·m.
    pub bending_moment: f64,
    /// Section modulus of the notched section, mm³.
    pub section_modulus: f64,
    /// Alternating bending stress, MPa; defined only when Kf is.
    pub alternating_stress: Option<f64>,
    /// Fatigue safety factor Se / σa; defined only when σa is defined and
    /// non-zero.
    pub safety_factor: Option<f64>,
}

impl ResultRecord {
    /// Classifies the computed safety factor for display.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_safety_factor(self.safety_factor)
    }
}

/// Neuber's constant as a cubic fit in UTS, valid for 340..=1700 MPa.
fn neuber_constant(uts: f64) -> Option<f64> {
    if (NEUBER_UTS_MIN..=NEUBER_UTS_MAX).contains(&uts) {
        Some(1.24 - 2.25e-3 * uts + 1.60e-6 * uts.powi(2) - 4.11e-10 * uts.powi(3))
    } else {
        None
    }
}

/// Size factor kb, piecewise on the larger diameter.
///
/// The 7.62..=51 mm branch is the standard rotating-beam range; everything
/// else, above or below, falls through to the large-diameter fit.
fn size_factor(da: f64) -> f64 {
    if (7.62..=51.0).contains(&da) {
        1.24 * da.powf(-0.107)
    } else {
        1.51 * da.powf(-0.157)
    }
}

/// Calculates the full result record for one input snapshot.
///
/// Pure and deterministic: no side effects, never panics for inputs that
/// satisfy the declared minimums. Formula preconditions that do not hold
/// yield `None` fields; NaN from exponentiation of non-physical values is
/// not trapped and propagates through the dependent fields.
///
/// # Examples
///
/// ```
/// use shaft_fatigue::fatigue::calculate;
/// use shaft_fatigue::input::{InputRecord, ShaftInputs};
///
/// let record = InputRecord::build(&ShaftInputs::default()).unwrap();
/// let results = calculate(&record);
/// assert_eq!(results.se_prime, 0.5 * record.uts);
/// assert!(results.safety_factor.is_some());
/// ```
pub fn calculate(input: &InputRecord) -> ResultRecord {
    let se_prime = 0.5 * input.uts;
    let ka = input.a * input.uts.powf(input.b);
    let kb = size_factor(input.da);
    let se = ka * kb * se_prime;

    let neuber = neuber_constant(input.uts);
    // r > 0 is guaranteed by the InputRecord invariant.
    let kf = neuber.map(|nc| 1.0 + (input.kt - 1.0) / (1.0 + nc / input.r.sqrt()));

    // The -250 offset is a correction term carried over from the worksheet
    // this tool reproduces; kept literally for parity.
    let bending_moment = input.lfa * input.fb / input.l - 250.0;
    let section_modulus = PI * input.db.powi(3) / 32.0;

    let alternating_stress = kf.map(|kf| kf * bending_moment / section_modulus);
    let safety_factor = match alternating_stress {
        Some(sigma_a) if sigma_a != 0.0 => Some(se / sigma_a),
        _ => None,
    };

    ResultRecord {
        se_prime,
        ka,
        kb,
        se,
        neuber_constant: neuber,
        kf,
        bending_moment,
        section_modulus,
        alternating_stress,
        safety_factor,
    }
}

/// Display classification of the safety factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Safety factor above 1.0.
    Safe,
    /// Safety factor exactly 1.0.
    AtLimit,
    /// Safety factor below 1.0 (or not a number).
    Unsafe,
    /// Safety factor could not be computed under the current inputs.
    NotComputable,
}

impl Verdict {
    pub fn from_safety_factor(n: Option<f64>) -> Verdict {
        match n {
            None => Verdict::NotComputable,
            Some(v) if v > 1.0 => Verdict::Safe,
            Some(v) if v == 1.0 => Verdict::AtLimit,
            Some(_) => Verdict::Unsafe,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            Verdict::Safe => "Shaft is SAFE (Safety Factor > 1.0)",
            Verdict::AtLimit => "Shaft is at CRITICAL LIMIT (Safety Factor = 1.0)",
            Verdict::Unsafe => "Shaft is UNSAFE (Safety Factor < 1.0)",
            Verdict::NotComputable => "Unable to calculate Safety Factor. Check inputs.",
        };
        write!(f, "{}", message)
    }
}

// src/lib.rs

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

pub mod app_logic;
pub mod config;
pub mod export;
pub mod fatigue;
pub mod input;

// When the "wasm" feature is enabled, use wasm_bindgen to expose the pipeline
// to the host environment over a flat numeric boundary.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn run_shaft_fatigue(fields: &[f64]) -> Vec<f64> {
    // Expects the twelve raw fields in declared order:
    // Da, Db, L, r, Lfa, Lfb, Fa, Fb, UTS, Sy, a, b.
    if fields.len() != 12 {
        return Vec::new();
    }
    let raw = input::ShaftInputs {
        da: fields[0],
        db: fields[1],
        l: fields[2],
        r: fields[3],
        lfa: fields[4],
        lfb: fields[5],
        fa: fields[6],
        fb: fields[7],
        uts: fields[8],
        sy: fields[9],
        a: fields[10],
        b: fields[11],
    };
    let record = match input::InputRecord::build(&raw) {
        Ok(record) => record,
        // An empty Vec signals a rejected input to the JavaScript side.
        Err(_) => return Vec::new(),
    };
    let results = fatigue::calculate(&record);
    // Flatten into [Kt, Se', ka, kb, Se, NC, Kf, M, Z, σa, n]. Non-computable
    // fields are encoded as NaN at this boundary only; inside the crate they
    // stay Option values. This is just one way to handle the return; the
    // JavaScript side may prefer a structured object instead.
    vec![
        record.kt,
        results.se_prime,
        results.ka,
        results.kb,
        results.se,
        results.neuber_constant.unwrap_or(f64::NAN),
        results.kf.unwrap_or(f64::NAN),
        results.bending_moment,
        results.section_modulus,
        results.alternating_stress.unwrap_or(f64::NAN),
        results.safety_factor.unwrap_or(f64::NAN),
    ]
}

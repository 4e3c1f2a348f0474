//! A module for the main application logic of the shaft fatigue calculator.

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use crate::config::load_config;
use crate::export;
use crate::fatigue::{calculate, ResultRecord, Verdict};
use crate::input::InputRecord;

pub fn run(config_path: &str, export_csv: bool) -> Result<()> {
    let conf = load_config(config_path)?;
    conf.validate()?;

    let input = InputRecord::build(&conf.shaft)?;
    let results = calculate(&input);

    match conf.output.format.as_str() {
        "JSON" => {
            let report = json!({ "input": input, "results": results });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_report(&input, &results),
    }

    if export_csv || conf.output.csv {
        // The snapshot lands next to the configuration file.
        let dir = Path::new(config_path).parent().unwrap_or(Path::new("."));
        let path = export::write_csv(&input, dir)?;
        println!("Wrote input snapshot to {}", path.display());
    }

    Ok(())
}

/// Formats an optional result field, rendering a non-computable value as "N/A".
fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => String::from("N/A"),
    }
}

fn print_report(input: &InputRecord, results: &ResultRecord) {
    println!("Input Parameters");
    println!("  Da  = {:>10.3} mm    Db  = {:>10.3} mm", input.da, input.db);
    println!("  L   = {:>10.3} mm    r   = {:>10.3} mm", input.l, input.r);
    println!("  Lfa = {:>10.3} mm    Lfb = {:>10.3} mm", input.lfa, input.lfb);
    println!("  Fa  = {:>10.3} N     Fb  = {:>10.3} N", input.fa, input.fb);
    println!("  UTS = {:>10.3} MPa   Sy  = {:>10.3} MPa", input.uts, input.sy);
    println!("  a   = {:>10.3} -     b   = {:>10.3} -", input.a, input.b);
    println!();

    println!("Fatigue Strength Calculations");
    println!("  {:<20} {:>12} {:>6}", "Parameter", "Value", "Units");
    println!("  {:<20} {:>12.3} {:>6}", "Se'", results.se_prime, "MPa");
    println!("  {:<20} {:>12.3} {:>6}", "ka", results.ka, "-");
    println!("  {:<20} {:>12.3} {:>6}", "kb", results.kb, "-");
    println!("  {:<20} {:>12.3} {:>6}", "Se", results.se, "MPa");
    println!();

    println!("Stress Analysis");
    println!("  {:<20} {:>12} {:>6}", "Parameter", "Value", "Units");
    println!("  {:<20} {:>12.3} {:>6}", "Kt", input.kt, "-");
    println!("  {:<20} {:>12} {:>6}", "Kf", fmt_opt(results.kf), "-");
    println!(
        "  {:<20} {:>12.3} {:>6}",
        "Bending Moment", results.bending_moment, "N·m"
    );
    println!(
        "  {:<20} {:>12.3} {:>6}",
        "Section Modulus", results.section_modulus, "mm³"
    );
    println!(
        "  {:<20} {:>12} {:>6}",
        "σa",
        fmt_opt(results.alternating_stress),
        "MPa"
    );
    println!();

    match results.safety_factor {
        Some(n) => println!("Safety Factor: {:.3}", n),
        None => println!("{}", Verdict::NotComputable),
    }
    if results.safety_factor.is_some() {
        println!("{}", results.verdict());
    }
}

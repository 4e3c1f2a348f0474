use clap::{Arg, ArgAction, Command};

fn main() {
    let matches = Command::new("ShaftFatigue")
        .version("0.1.0")
        .about("Fatigue safety factor calculator for stepped circular shafts under bending")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the YAML session configuration")
                .required(true),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .action(ArgAction::SetTrue)
                .help("Write the input snapshot as shaft_input.csv next to the configuration"),
        )
        .after_help(
            "The configuration seeds the input widgets; derived fatigue quantities \
             are recomputed from scratch for every run. Fields whose formula \
             precondition does not hold are reported as N/A.",
        )
        .get_matches();

    let export_csv = matches.get_flag("csv");
    if let Some(path) = matches.get_one::<String>("config") {
        if let Err(err) = shaft_fatigue::app_logic::run(path, export_csv) {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

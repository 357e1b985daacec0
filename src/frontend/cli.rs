use std::path::PathBuf;

use clap::{Arg, Command};

use super::experiments::{self, ExperimentError};


const ARG_EXPERIMENT_TITLE: &str = "experiment title";
const ARG_OUTPUT_DIR: &str       = "output directory";

const EXP_PROPAGATION: &str = "propagation";
const EXP_RUNTIME: &str     = "runtime";

const DEFAULT_OUTPUT_DIR: &str = ".";


/// # Errors
///
/// Will return `Err` if the selected experiment fails.
pub fn cli() -> Result<(), ExperimentError> {
    let matches = Command::new("adhoc_wifi_experiments")
        .version("0.1.0")
        .about(
            "Compares radio propagation models between two ad-hoc \
             Wi-Fi nodes."
        )
        .arg(
            Arg::new(ARG_EXPERIMENT_TITLE)
                .short('x')
                .long("experiment")
                .value_parser([EXP_PROPAGATION, EXP_RUNTIME])
                .default_value(EXP_PROPAGATION)
                .help("Choose experiment title")
        )
        .arg(
            Arg::new(ARG_OUTPUT_DIR)
                .short('o')
                .long("output-dir")
                .default_value(DEFAULT_OUTPUT_DIR)
                .help("Set the directory for CSV and flow statistics files")
        )
        .get_matches();

    let output_dir = PathBuf::from(
        matches.get_one::<String>(ARG_OUTPUT_DIR).unwrap()
    );

    match matches
        .get_one::<String>(ARG_EXPERIMENT_TITLE)
        .unwrap()
        .as_str()
    {
        EXP_RUNTIME => experiments::runtime_comparison(&output_dir),
        _ => experiments::propagation_comparison(&output_dir),
    }
}

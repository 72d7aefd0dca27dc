use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;

use nbayes::config::{load_config, PipelineConfig};
use nbayes::pipeline::run_classification;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("NBAYES_LOG", "error,nbayes=info"))
        .init();

    let matches = Command::new("nbayes")
        .version(clap::crate_version!())
        .about("Categorical Naive Bayes classifier with step-by-step report output")
        .arg(
            Arg::new("data")
                .help("Path to the ';'-delimited input data file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON pipeline configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_file")
                .short('o')
                .long("output")
                .help("Write the report to this file instead of stdout")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    let data_path: &PathBuf = matches.get_one("data").unwrap();
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };

    let contents = std::fs::read_to_string(data_path)
        .with_context(|| format!("Failed to read data file: {}", data_path.display()))?;

    match run_classification(&contents, &config) {
        Ok(lines) => {
            let report = lines.join("\n");
            match matches.get_one::<PathBuf>("output_file") {
                Some(path) => {
                    std::fs::write(path, report + "\n")
                        .with_context(|| format!("Failed to write report: {}", path.display()))?;
                    log::info!("report written to {}", path.display());
                }
                None => println!("{}", report),
            }
            Ok(())
        }
        Err(e) => {
            log::error!("classification failed: {}", e);
            println!("Error: {}", e);
            std::process::exit(1)
        }
    }
}

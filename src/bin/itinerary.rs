//! Command-line interface for itinerary
//! Reads an itinerary text file, rewrites airport codes and date markers and
//! writes the result to a new file.
//!
//! Usage:
//!   itinerary `<input>` `<output>` `<airport-lookup>` [--config `<file>`] [--verbose]

use clap::{Arg, ArgAction, ArgMatches, Command};
use itinerary::itinerary::config::Loader;
use itinerary::itinerary::processor::process_file;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("itinerary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Itinerary prettifier: replaces airport codes and normalizes date markers")
        .arg(
            Arg::new("input")
                .help("Path to the itinerary text file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Path the rewritten itinerary is written to")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("airport-lookup")
                .help("Path to the airport lookup CSV")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("name-column")
                .long("name-column")
                .help("Header of the lookup column used as replacement text"),
        )
        .arg(
            Arg::new("keep-blank-lines")
                .long("keep-blank-lines")
                .help("Do not collapse runs of blank lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every fallback to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<itinerary::itinerary::config::ItineraryConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(name) = matches.get_one::<String>("name-column") {
        loader = loader.name_column(name).map_err(|e| e.to_string())?;
    }
    if matches.get_flag("keep-blank-lines") {
        loader = loader.keep_blank_lines().map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    // Arguments are required, clap exits before we get here without them
    let input = matches.get_one::<String>("input").unwrap();
    let output = matches.get_one::<String>("output").unwrap();
    let lookup = matches.get_one::<String>("airport-lookup").unwrap();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let text = process_file(input, lookup, &config).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    if let Err(e) = std::fs::write(output, text) {
        eprintln!("Error writing output file: {}", e);
        std::process::exit(1);
    }
}

//! Command-line interface for pagemap
//! Builds logical-to-physical page mappings from table-of-contents anchors.
//!
//! Usage:
//!   pagemap extract `<document>` [--output `<file>`]                       - Report or save the anchor mapping
//!   pagemap build `<case_dir>` `<offset_document>` `<anchor_document>`     - Build and store both mappings of a case
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default: `warn`).
mod commands;
mod report;

use clap::{Arg, ArgMatches, Command};
use commands::CommandError;
use pagemap_config::{Loader, PagemapConfig};
use std::path::Path;

const LOCAL_CONFIG: &str = "pagemap.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("pagemap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Map printed page numbers to physical pages using contents hyperlinks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults (default: ./pagemap.toml if present)"),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract contents anchors and build the page mapping")
                .arg(
                    Arg::new("document")
                        .help("Path to the link dump of the document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the mapping as JSON instead of printing a report"),
                )
                .arg(
                    Arg::new("scan")
                        .long("scan")
                        .help("How far to scan for anchors")
                        .value_parser(["full", "until-gap", "first-pages"]),
                )
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .help("What to do when two anchors name the same logical page")
                        .value_parser(["keep-last", "keep-first", "report-conflict"]),
                ),
        )
        .subcommand(
            Command::new("build")
                .about("Build and store the offset and anchor mappings of a case")
                .arg(
                    Arg::new("case_dir")
                        .help("Case directory; mappings are stored under it")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("offset_document")
                        .help("Document mapped with a constant offset (always rebuilt)")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("anchor_document")
                        .help("Document mapped from its contents anchors (cached)")
                        .required(true)
                        .index(3),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("extract", extract_matches)) => {
            let document = extract_matches.get_one::<String>("document").unwrap();
            let output = extract_matches.get_one::<String>("output").map(Path::new);
            load_config(extract_matches, extract_overrides(extract_matches)).and_then(|config| {
                commands::handle_extract(&config, Path::new(document), output)
            })
        }
        Some(("build", build_matches)) => {
            let case_dir = build_matches.get_one::<String>("case_dir").unwrap();
            let offset_document = build_matches.get_one::<String>("offset_document").unwrap();
            let anchor_document = build_matches.get_one::<String>("anchor_document").unwrap();
            load_config(build_matches, Vec::new()).and_then(|config| {
                commands::handle_build(
                    &config,
                    Path::new(case_dir),
                    Path::new(offset_document),
                    Path::new(anchor_document),
                )
            })
        }
        _ => unreachable!(),
    };

    // Only argument errors change the exit status; everything else is reported
    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
}

/// Config keys set from extract flags.
fn extract_overrides(matches: &ArgMatches) -> Vec<(&'static str, String)> {
    let mut overrides = Vec::new();
    if let Some(scan) = matches.get_one::<String>("scan") {
        overrides.push(("extract.scan", scan.clone()));
    }
    if let Some(policy) = matches.get_one::<String>("policy") {
        overrides.push(("anchors.policy", policy.clone()));
    }
    overrides
}

/// Defaults, then the config file, then command-line overrides.
fn load_config(
    matches: &ArgMatches,
    overrides: Vec<(&'static str, String)>,
) -> Result<PagemapConfig, CommandError> {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    overrides
        .into_iter()
        .try_fold(loader, |loader, (key, value)| loader.set_override(key, value))
        .and_then(Loader::build)
        .map_err(|e| CommandError::Config(e.to_string()))
}

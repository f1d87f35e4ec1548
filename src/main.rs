//! page-sort command line entry point
//!
//! Sorts JSON pages of view records the same way the listing endpoints do:
//! by a named field, in a chosen direction, with a chosen algorithm.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process;
use tracing_subscriber::EnvFilter;

use page_sort::{
    config::{EntityKind, SortConfig, SortConfigBuilder, DEFAULT_MAX_PAGE_SIZE},
    error::SortResult,
    sort, Algorithm,
};

fn main() {
    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("page-sort: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn init_tracing(config: &SortConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> SortResult<i32> {
    let config = parse_config_from_matches(matches)?;
    init_tracing(&config);
    sort(&config)
}

fn build_cli() -> Command {
    let algorithms = Algorithm::ALL
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join(", ");

    Command::new("page-sort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("page-sort [OPTION]... [FILE]...")
        .about("Sort pages of e-commerce view records")
        .long_about("Sort JSON pages of view records by a named field.\n\nEach FILE holds one page: a JSON array of records of the selected entity kind. Unknown field or algorithm names leave the page unchanged, matching the listing endpoints.")
        .arg(Arg::new("files")
            .help("Input pages to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))
        .arg(Arg::new("entity")
            .short('e')
            .long("entity")
            .help("Entity kind of the records")
            .value_name("KIND")
            .value_parser(["products", "orders", "categories", "inventory", "users"])
            .default_value("products"))
        .arg(Arg::new("sort-by")
            .short('k')
            .long("sort-by")
            .help("Field to sort by, e.g. NAME, PRICE, TOTAL_AMOUNT")
            .value_name("FIELD"))
        .arg(Arg::new("algorithm")
            .short('a')
            .long("algorithm")
            .help("Sort algorithm (entity default if omitted)")
            .long_help(format!("Sort algorithm: {algorithms}. Products default to QUICKSORT, everything else to MERGESORT. MERGESORT keeps records with equal keys in their input order; QUICKSORT does not."))
            .value_name("NAME"))
        .arg(Arg::new("ascending")
            .long("ascending")
            .help("Sort in ascending order")
            .action(ArgAction::SetTrue)
            .conflicts_with("descending"))
        .arg(Arg::new("descending")
            .short('r')
            .long("descending")
            .help("Sort in descending order")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check that pages are already sorted; do not sort")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("pretty")
            .short('p')
            .long("pretty")
            .help("Pretty-print a single output page")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("max-page-size")
            .long("max-page-size")
            .help(format!("Reject pages with more records than N (default {DEFAULT_MAX_PAGE_SIZE})"))
            .value_name("N")
            .value_parser(clap::value_parser!(usize)))
        .arg(Arg::new("parallel")
            .long("parallel")
            .help("Change the number of pages sorted concurrently to N")
            .value_name("N")
            .value_parser(clap::value_parser!(usize)))
        .arg(Arg::new("debug")
            .long("debug")
            .help("Log dispatch decisions to stderr")
            .action(ArgAction::SetTrue))
}

fn parse_config_from_matches(matches: &ArgMatches) -> SortResult<SortConfig> {
    let entity = matches
        .get_one::<String>("entity")
        .map(|s| s.parse::<EntityKind>())
        .transpose()?
        .unwrap_or(EntityKind::Products);

    let mut builder = SortConfigBuilder::new().entity(entity);

    if let Some(field) = matches.get_one::<String>("sort-by") {
        builder = builder.sort_by(field);
    }
    if let Some(algorithm) = matches.get_one::<String>("algorithm") {
        builder = builder.algorithm(algorithm);
    }
    if matches.get_flag("descending") {
        builder = builder.descending();
    } else if matches.get_flag("ascending") {
        builder = builder.ascending();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }
    if matches.get_flag("pretty") {
        builder = builder.pretty();
    }
    if let Some(&size) = matches.get_one::<usize>("max-page-size") {
        builder = builder.max_page_size(size);
    }
    if let Some(&threads) = matches.get_one::<usize>("parallel") {
        builder = builder.parallel_threads(threads);
    }
    if matches.get_flag("debug") {
        builder = builder.debug();
    }

    let files: Vec<String> = matches
        .get_many::<String>("files")
        .unwrap_or_default()
        .cloned()
        .collect();
    builder = builder.input_files(files);

    builder.build()
}

//! `stow`: search a listing catalog for storage space.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use u_stow_catalog::{CatalogLoader, CatalogStore, SyntheticSpec, DEFAULT_CATALOG_FILE};
use u_stow_cli::{generate, inspect, search, CommandOutput, EXIT_FAILURE, EXIT_OK};
use u_stow_core::{SearchConfig, DEFAULT_MAX_VEHICLES, DEFAULT_VEHICLE_WIDTH};

#[derive(Parser)]
#[command(name = "stow")]
#[command(about = "Find the cheapest locations that can store a set of vehicles")]
#[command(version)]
struct Cli {
    /// Catalog file (JSON object of location id -> listings)
    #[arg(long, global = true, default_value = DEFAULT_CATALOG_FILE)]
    catalog: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog with a JSON request
    Search {
        /// Request file; reads stdin when omitted or "-"
        request: Option<PathBuf>,

        /// Vehicle width and grid cell size
        #[arg(long, default_value_t = DEFAULT_VEHICLE_WIDTH)]
        unit: u32,

        /// Maximum total vehicles per request
        #[arg(long, default_value_t = DEFAULT_MAX_VEHICLES)]
        max_vehicles: u32,

        /// Pack locations in parallel
        #[arg(long)]
        parallel: bool,

        /// Also list excluded locations and why
        #[arg(long)]
        report: bool,
    },

    /// Summarize the catalog
    Inspect {
        /// Fail if the catalog is missing, unparsable or has duplicate ids
        #[arg(long)]
        strict: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic catalog
    Generate {
        /// Random seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of locations
        #[arg(short, long, default_value = "100")]
        locations: usize,

        /// Maximum listings per location
        #[arg(long, default_value = "6")]
        max_listings: usize,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn read_body(request: Option<&Path>) -> anyhow::Result<String> {
    match request {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading request {}", path.display())),
        _ => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("reading request from stdin")?;
            Ok(body)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<CommandOutput> {
    match cli.command {
        Commands::Search {
            request,
            unit,
            max_vehicles,
            parallel,
            report,
        } => {
            let body = read_body(request.as_deref())?;
            let config = SearchConfig::new()
                .with_unit(unit)
                .with_max_vehicles(max_vehicles)
                .with_parallel(parallel);
            let store = CatalogStore::open(CatalogLoader::new(&cli.catalog));
            search(&store, &body, config, report)
        }

        Commands::Inspect { strict, json } => inspect(
            &CatalogLoader::new(&cli.catalog),
            SearchConfig::default(),
            strict,
            json,
        ),

        Commands::Generate {
            seed,
            locations,
            max_listings,
            output,
        } => {
            let spec = SyntheticSpec {
                locations,
                max_listings,
                ..Default::default()
            };
            generate(&spec, seed, output.as_deref())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("{}", output.stdout);
            if output.exit_code != EXIT_OK {
                std::process::exit(output.exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

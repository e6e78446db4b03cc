//! Topology Handles CLI
//!
//! Usage:
//!   topology-handles [OPTIONS] <COMMAND>
//!
//! Commands:
//!   check    Validate handle identifiers
//!   make     Build a handle identifier from loose parts
//!   catalog  Show the handle inventory of a node type
//!   layout   Resolve the handles of a node record (JSON)
//!   edge     Resolve the geometry of an edge (JSON)
//!   lint     Check a handle catalog for problems

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use topology_handles::{
    lint, resolve_edge_json, resolve_node_json, Config, HandleCatalog, HandleId,
};

#[derive(Parser)]
#[command(name = "topology-handles")]
#[command(about = "Connection point names, layout and edge geometry for channel diagrams")]
struct Cli {
    /// Handle catalog file (TOML format); the built-in catalog when omitted
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Log resolution decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate handle identifiers, e.g. `in-left-1`
    Check {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Build a handle identifier, repairing unusable parts
    Make {
        /// `in`, `out`, `target` or `source`
        #[arg(long, default_value = "")]
        kind: String,
        /// `left`, `right`, `top` or `bottom`
        #[arg(long, default_value = "")]
        side: String,
        /// Positive integer
        #[arg(long)]
        index: Option<String>,
    },

    /// Show the handle inventory of a node type, or list the configured types
    Catalog {
        node_type: Option<String>,
    },

    /// Resolve the handles of a node record (reads stdin if no file)
    Layout {
        input: Option<PathBuf>,
    },

    /// Resolve the geometry of an edge (reads stdin if no file)
    Edge {
        input: Option<PathBuf>,
    },

    /// Check the handle catalog for problems
    Lint,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path),
        None => HandleCatalog::builtin(),
    };
    let config = Config::new().with_catalog(catalog);

    match cli.command {
        Command::Check { ids } => {
            let mut failed = false;
            for id in &ids {
                match id.parse::<HandleId>() {
                    Ok(handle) => println!("{}: ok ({})", id, handle.handle_type()),
                    Err(e) => {
                        failed = true;
                        eprint!("{}", e.format(id, "handle"));
                    }
                }
            }
            if failed {
                process::exit(1);
            }
        }
        Command::Make { kind, side, index } => {
            println!("{}", topology_handles::make(&kind, &side, index));
        }
        Command::Catalog { node_type } => match node_type {
            Some(node_type) => print_json(&config.catalog.lookup(node_type.as_str())),
            None => {
                for node_type in config.catalog.types() {
                    println!("{}", node_type);
                }
            }
        },
        Command::Layout { input } => {
            let source = read_input(input.as_deref());
            match resolve_node_json(&source, &config) {
                Ok(handles) => print_json(&handles),
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
        Command::Edge { input } => {
            let source = read_input(input.as_deref());
            match resolve_edge_json(&source, &config) {
                Ok(edge) => print_json(&edge),
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
        Command::Lint => {
            for warning in lint::check(&config.catalog) {
                println!("{}", warning);
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_catalog(path: &Path) -> HandleCatalog {
    match HandleCatalog::from_file(path) {
        Ok(catalog) => catalog,
        Err(e) => fail(format!("Error loading catalog '{}': {}", path.display(), e)),
    }
}

fn read_input(path: Option<&Path>) -> String {
    match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => fail(format!("Error reading file '{}': {}", path.display(), e)),
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => fail(format!("Error reading from stdin: {}", e)),
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("Error: {}", e)),
    }
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

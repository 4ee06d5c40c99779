use clap::{Parser as ClapParser, Subcommand};
use pcs_lang::cli::{self, CheckOptions, CheckResult, CliError};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[derive(ClapParser)]
#[command(name = "pcs")]
#[command(about = "pcs - Parse, validate and query parameter configuration space documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and report problems
    Check {
        /// The .pcs file to load
        file: PathBuf,
    },

    /// Print the regenerated document
    Print {
        /// The .pcs file to load
        file: PathBuf,
    },

    /// Check whether a parameter is active under a configuration
    Active {
        /// The .pcs file to load
        file: PathBuf,

        /// Parameter name
        parameter: String,

        /// JSON object of parameter values (reads from stdin if not provided)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'pcs docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file } => run_check(file, None, None, false),
        Commands::Print { file } => run_check(file, None, None, true),
        Commands::Active {
            file,
            parameter,
            config,
        } => run_check(file, Some(parameter), config, false),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    file: PathBuf,
    parameter: Option<String>,
    config: Option<String>,
    print: bool,
) -> Result<(), CliError> {
    let source = fs::read_to_string(&file)?;

    let config = match config {
        Some(s) => Some(s),
        None if parameter.is_some() && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        source,
        parameter,
        config,
        print,
    };

    match cli::execute_check(&options)? {
        CheckResult::Valid(warnings) => {
            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
            println!("{}: ok ({} warnings)", file.display(), warnings.len());
        }
        CheckResult::Printed(text) => print!("{}", text),
        CheckResult::Active(active) => println!("{}", active),
    }
    Ok(())
}

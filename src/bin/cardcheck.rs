//! CLI tool for payment card number checking.
//!
//! # Usage
//!
//! ```bash
//! # Check one number
//! cardcheck check "4532 0151 1283 0366"
//!
//! # Keep asking until a valid number is entered
//! cardcheck interactive
//!
//! # Use a custom issuer catalog
//! cardcheck --catalog issuers.json check 4532015112830366
//!
//! # List issuers in resolution order
//! cardcheck issuers
//! ```

use cardcheck::catalog::{CsvCatalogLoader, JsonCatalogLoader};
use cardcheck::{
    CatalogError, IssuerCatalog, IssuerMatch, ValidationOutcome, Validator, ValidatorConfig,
    CARD_DIGITS,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Payment card number checking tool")]
struct Cli {
    /// Issuer catalog (.json or .csv); the built-in table is used if omitted
    #[arg(long, global = true, env = "CARDCHECK_CATALOG")]
    catalog: Option<PathBuf>,

    /// Required number of digits
    #[arg(long, global = true, default_value_t = CARD_DIGITS)]
    length: usize,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    /// Log debug events to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a card number
    Check {
        /// Card number to check (spaces and dashes allowed)
        card_number: String,
    },

    /// Prompt on stdin until a valid card number is entered
    Interactive,

    /// List the catalog's issuers in resolution order
    Issuers,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded = load_catalog(cli.catalog.as_deref());
    let config = ValidatorConfig::new().with_length(cli.length);
    let validator = Validator::from_load_result(&loaded).with_config(config);

    match cli.command {
        Commands::Check { card_number } => cmd_check(&validator, &card_number, cli.output),
        Commands::Interactive => cmd_interactive(&validator, cli.output),
        Commands::Issuers => cmd_issuers(&loaded),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "cardcheck=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<IssuerCatalog, CatalogError> {
    let Some(path) = path else {
        return Ok(IssuerCatalog::builtin());
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => CsvCatalogLoader::from_file(path),
        Some(ext) if ext.eq_ignore_ascii_case("json") => JsonCatalogLoader::from_file(path),
        _ => Err(CatalogError::Parse(format!(
            "unsupported catalog format: {} (expected .json or .csv)",
            path.display()
        ))),
    }
}

fn cmd_check(validator: &Validator<'_>, card_number: &str, output: OutputFormat) -> ExitCode {
    let outcome = validator.validate(card_number);
    print_outcome(&outcome, output);

    if outcome.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_interactive(validator: &Validator<'_>, output: OutputFormat) -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter card number: ");
        io::stdout().flush().ok();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error: failed to read input: {}", e);
                return ExitCode::FAILURE;
            }
            None => {
                println!();
                return ExitCode::FAILURE;
            }
        };

        let outcome = validator.validate(&line);
        print_outcome(&outcome, output);

        if outcome.is_valid() {
            if let OutputFormat::Text = output {
                println!("Done.");
            }
            return ExitCode::SUCCESS;
        }
        if let OutputFormat::Text = output {
            println!("Please re-enter the number.");
        }
    }
}

fn cmd_issuers(loaded: &Result<IssuerCatalog, CatalogError>) -> ExitCode {
    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for issuer in catalog.iter_by_specificity() {
        let rules: Vec<String> = issuer.rules_by_specificity().map(|r| r.to_string()).collect();
        println!("{:<20} {}", issuer.name(), rules.join(", "));
    }
    ExitCode::SUCCESS
}

fn print_outcome(outcome: &ValidationOutcome, output: OutputFormat) {
    match output {
        OutputFormat::Text => print_text(outcome),
        OutputFormat::Json => match serde_json::to_string(outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: failed to serialize outcome: {}", e),
        },
    }
}

fn print_text(outcome: &ValidationOutcome) {
    match outcome {
        ValidationOutcome::InvalidCharacter { character } => {
            println!("Input contains the invalid character '{}'.", character.escape_default());
        }
        ValidationOutcome::InvalidLength { expected, .. } => {
            println!("The number must have {} digits.", expected);
        }
        ValidationOutcome::ChecksumFailed { number } => {
            println!("The number {} is INVALID.", number);
        }
        ValidationOutcome::Valid { number, issuer } => {
            println!("The number {} is VALID.", number);
            match issuer {
                IssuerMatch::Resolved(name) => println!("Issuer: {}", name),
                IssuerMatch::NoMatch => println!("Issuer: unknown"),
                IssuerMatch::CatalogUnavailable => println!("Issuer: not available (catalog failed to load)"),
            }
        }
    }
}

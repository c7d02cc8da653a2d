mod logging;
mod report;
mod settings;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use seedling_core::{
    OrderCheck, ParseOptions, SchemaError, build_dependency_report, load_schema_with,
    schema_json_schema, summarize,
};
use settings::{LogFormat, SettingsError, load_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "seedling", version, about = "Seedling schema description tools")]
struct Cli {
    /// Settings file (defaults to ./seedling.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a schema description and print a summary.
    Validate(ValidateArgs),
    /// Compare the declared generation order with the foreign key order.
    Order(OrderArgs),
    /// Print the JSON Schema for schema description documents.
    JsonSchema,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Schema description file.
    path: PathBuf,
    /// How generation_order is checked.
    #[arg(long, value_enum)]
    order_check: Option<OrderCheckArg>,
    /// Print the summary as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct OrderArgs {
    /// Schema description file.
    path: PathBuf,
    /// Print the dependency report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderCheckArg {
    Membership,
    Dependencies,
}

impl From<OrderCheckArg> for OrderCheck {
    fn from(value: OrderCheckArg) -> Self {
        match value {
            OrderCheckArg::Membership => OrderCheck::Membership,
            OrderCheckArg::Dependencies => OrderCheck::Dependencies,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config.as_deref())?;

    let format = cli.log_format.unwrap_or(settings.logging.format);
    let level = match cli.verbose {
        0 => settings.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    logging::init_logging(format, level).map_err(CliError::Logging)?;

    match cli.command {
        Command::Validate(args) => run_validate(args, settings.validation),
        Command::Order(args) => run_order(args, settings.validation),
        Command::JsonSchema => run_json_schema(),
    }
}

fn run_validate(args: ValidateArgs, defaults: ParseOptions) -> Result<(), CliError> {
    let options = match args.order_check {
        Some(order_check) => ParseOptions::with_order_check(order_check.into()),
        None => defaults,
    };

    tracing::info!(event = "validate_started", path = %args.path.display());
    let schema = load_schema_with(&args.path, &options)?;
    let summary = summarize(&schema);
    tracing::info!(
        event = "validate_finished",
        schema = %schema.name,
        tables = summary.counts.tables
    );

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
        writeln!(stdout)?;
    } else {
        report::write_summary(&mut stdout, &summary)?;
    }

    Ok(())
}

fn run_order(args: OrderArgs, options: ParseOptions) -> Result<(), CliError> {
    let schema = load_schema_with(&args.path, &options)?;
    let dependencies = build_dependency_report(&schema);

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &dependencies)?;
        writeln!(stdout)?;
    } else {
        report::write_order(&mut stdout, schema.generation_order(), &dependencies)?;
    }

    Ok(())
}

fn run_json_schema() -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &schema_json_schema())?;
    writeln!(stdout)?;
    Ok(())
}

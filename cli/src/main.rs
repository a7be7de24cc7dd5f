//! Command-line front end for the envelope funding engine.
//!
//! Reads a JSON request from a file (or stdin with `-`), runs the engine,
//! and prints the JSON response to stdout. Stands in for the HTTP layer
//! during development and scripting.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use envelope_funding_core_rs::api::{
    plan_warnings, run_allocation, run_autofunding, AllocationRequest, AutofundingRequest,
    ExecutionRecord,
};

#[derive(Parser, Debug)]
#[command(name = "envelope-funding")]
#[command(about = "Deterministic paycheck allocation and autofunding engine")]
struct Cli {
    /// Pretty-print the response JSON
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a paycheck across envelopes with an allocation strategy
    Allocate {
        /// Path to an AllocationRequest JSON file, or `-` for stdin
        #[arg(long)]
        request: PathBuf,
    },

    /// Run an autofunding rule pass over an unassigned cash pool
    Autofund {
        /// Path to an AutofundingRequest JSON file, or `-` for stdin
        #[arg(long)]
        request: PathBuf,

        /// Also print the execution record and plan warnings to stderr
        #[arg(long)]
        summary: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Allocate { request } => {
            let raw = read_input(request)?;
            let request: AllocationRequest = serde_json::from_str(&raw)?;
            debug!(
                strategy = request.strategy.as_str(),
                paycheck = request.paycheck_amount_minor,
                envelopes = request.envelopes.len(),
                "running allocation"
            );

            let result = run_allocation(&request);
            info!(
                total = result.total_allocated_minor,
                remaining = result.remaining_minor,
                elapsed_ms = result.execution_time_ms,
                "allocation complete"
            );
            print_json(&result, cli.pretty)?;
        }
        Command::Autofund { request, summary } => {
            let raw = read_input(request)?;
            let request: AutofundingRequest = serde_json::from_str(&raw)?;
            let initial_pool = request.context.unassigned_cash_minor;
            debug!(
                rules = request.rules.len(),
                pool = initial_pool,
                "running autofunding pass"
            );

            let response = run_autofunding(&request);
            info!(
                total = response.total_allocated_minor,
                remaining = response.remaining_minor,
                rules_executed = response.rules_executed,
                elapsed_ms = response.execution_time_ms,
                "autofunding pass complete"
            );

            if *summary {
                let record = ExecutionRecord::from_response(&response);
                eprintln!("fingerprint: {}", record.fingerprint);
                for warning in plan_warnings(&response, initial_pool) {
                    eprintln!("warning: {}", serde_json::to_string(&warning)?);
                }
            }
            print_json(&response, cli.pretty)?;
        }
    }
    Ok(())
}

fn read_input(path: &PathBuf) -> Result<String, std::io::Error> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(path)
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), serde_json::Error> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

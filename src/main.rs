//! loteria — Christmas Lottery prize checker.
//!
//! Entry point. Parses the CLI, initialises structured logging, loads
//! configuration, reads the ticket file, and runs the polling loop until
//! every number is resolved or the draw ends.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

use loteria::api::elpais::ElPaisClient;
use loteria::config::AppConfig;
use loteria::poller::{DrawPoller, TokioClock};
use loteria::tickets::{self, TicketFileError};

const MALFORMED_MSG: &str =
    "Asegúrese de que en cada línea sólo haya un número y de que tenga el formato correcto.";

#[derive(Parser)]
#[command(name = "loteria")]
#[command(about = "Comprueba décimos de la Lotería de Navidad contra el API de resultados de El País")]
#[command(version)]
struct Cli {
    /// Fichero con la lista de números, uno por línea
    fichero_con_numeros: PathBuf,

    /// Ruta del fichero de configuración TOML (opcional)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing file argument → clap usage error, exit 2
    let cli = Cli::parse();

    init_logging();

    let cfg = match AppConfig::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Fail fast on input problems, before any network traffic
    let tickets = match tickets::load_tickets(&cli.fichero_con_numeros) {
        Ok(tickets) => tickets,
        Err(TicketFileError::NotFound { path }) => {
            println!("\nNo se encuentra el fichero {path}\n");
            return ExitCode::FAILURE;
        }
        Err(TicketFileError::MalformedLine { .. }) => {
            println!("\n{MALFORMED_MSG}\n");
            return ExitCode::FAILURE;
        }
    };

    info!(
        tickets = tickets.len(),
        interval_secs = cfg.poller.interval_secs,
        base_url = %cfg.api.base_url,
        "Starting lottery check"
    );

    let client = match ElPaisClient::new(&cfg.api) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let clock = TokioClock;
    let poller = DrawPoller::new(
        &client,
        &clock,
        Duration::from_secs(cfg.poller.interval_secs),
    );
    let report = poller.run(&tickets).await;

    println!();
    println!("{}", report.summary_message());

    ExitCode::SUCCESS
}

/// Initialise the `tracing` subscriber.
///
/// Diagnostics go to stderr so the result lines on stdout stay clean;
/// default level is `warn`, raise with `RUST_LOG=loteria=debug`.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("loteria=warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

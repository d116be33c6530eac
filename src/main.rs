//! linked-steps - run step-by-step guides published on a SPARQL endpoint.

mod cli;

use cli::Cli;
use linked_steps::config::Config;
use linked_steps::consumer::{CommandRunner, ShellExecutor, TerminalPrinter};
use linked_steps::error::Result;
use linked_steps::logging;
use linked_steps::SparqlClient;
use std::io;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();
    logging::init_stderr_logging(logging::level_for_verbosity(cli.verbose));

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let target = config
        .endpoint
        .resolve_with_env(&cli.endpoint_overrides())?
        .to_target()?;

    let query = cli.build_query()?;
    let client = SparqlClient::new(target)?;
    info!(endpoint = %client.target().url(), "running query");

    if cli.print {
        let mut printer = TerminalPrinter::new();
        return client.execute(&query, &mut printer).await;
    }

    let shell = cli.shell.clone().unwrap_or(config.run.shell);
    let mut runner = CommandRunner::with_executor(ShellExecutor::with_shell(shell), io::stdout())
        .dry_run(cli.dry_run);
    client.execute(&query, &mut runner).await
}

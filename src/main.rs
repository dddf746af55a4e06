use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pr_comments::cli::Cli;
use pr_comments::config::Config;
use pr_comments::orchestrator::Orchestrator;
use pr_comments::sources::github::GitHubSource;

/// Environment variable holding a tracing filter directive, e.g. `pr_comments=debug`.
const LOG_ENV: &str = "PR_COMMENTS_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(?config, "config loaded");

    let source = GitHubSource::new(&config);
    let orchestrator = Orchestrator::new(source, config);

    if let Err(e) = orchestrator.run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

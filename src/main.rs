use clap::Parser;
use taxon::cli::commands::Cli;
use taxon::cli::handlers;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

//! `atlas` binary

use atlas_cli::{build_cli, run, verbosity_level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(verbosity_level(matches.get_count("verbose")))
    });
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(&matches, &mut stdout).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

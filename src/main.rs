//! phpunit-runner CLI entry point

fn main() {
    // Stdout may carry command lines or protocol responses, so logging stays quiet unless RUST_LOG asks
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    phpunit_runner::cli::run();
}

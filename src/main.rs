use anyhow::{Context, Result};
use clap::Parser;
use kml2milx::{cli, extract, milx, output, RuleStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // RUST_LOG wins over the verbose flag.
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.verbose {
        EnvFilter::new("kml2milx=debug")
    } else {
        EnvFilter::new("kml2milx=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!("logging initialized (verbose={})", args.verbose);

    // Status info never goes to stdout.
    eprintln!("kml2milx v{}", env!("CARGO_PKG_VERSION"));

    let rules = RuleStore::load(&args.rules)
        .with_context(|| format!("failed to load rule file {}", args.rules))?;

    let kml = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input {}", args.input))?;

    let layer = extract::convert(&kml, &rules)
        .with_context(|| format!("failed to convert {}", args.input))?;

    output::print_layer(&layer, &args.format)?;

    milx::write_file(&layer, &args.output)
        .with_context(|| format!("failed to write {}", args.output))?;

    eprintln!("wrote {} units to {}", layer.units.len(), args.output);
    Ok(())
}

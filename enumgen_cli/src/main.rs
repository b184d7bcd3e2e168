//! enumgen CLI
//!
//! Scans one module directory for types marked with `enumgen::MemberOf` and
//! writes the generated visitors next to them.

mod args;

use clap::Parser;
use tracing::info;

use args::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config();

    info!("Scanning module in {}", config.wd().display());
    let out = enumgen_core::generate(&config)?;
    println!("{}", out.display());

    Ok(())
}

//! apiforge - Main Entry Point
//!
//! Prints a ready-to-run request for one OpenAPI operation.

use apiforge::{Invocation, run};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; stdout carries only the generated code
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Workspace falls back to APIFORGE_WORKSPACE, then "."
    let invocation = Invocation::parse();
    tracing::debug!(
        workspace = %invocation.workspace.display(),
        "apiforge v{}",
        env!("CARGO_PKG_VERSION")
    );

    let snippet = run(&invocation).await?;
    println!("{}", snippet.full_code());

    Ok(())
}

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use disk_doctor_core::{render_report, SysinfoProvider};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "disk-doctor",
    version,
    about = "Report identity, capacity, partition layout, and a derived health score for local storage devices."
)]
struct Cli {
    /// Disable ANSI color in the report.
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(error) = run() {
        report_failure(&error);
    }

    // Finalization runs on every path. This is an interactive diagnostic:
    // errors are reported above but never signalled through the exit code.
    println!();
    println!("Diagnostic run complete.");
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    let provider = SysinfoProvider::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_report(&provider, &mut out).context("failed to render disk report")?;
    out.flush().context("failed to flush report output")?;
    Ok(())
}

fn report_failure(error: &anyhow::Error) {
    eprintln!("Disk report failed: {error:#}");
    eprintln!("Suggestions:");
    eprintln!("  - re-run with administrative privilege");
    eprintln!("  - check physical drive connections");
    eprintln!("  - retry; transient enumeration failures do occur");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

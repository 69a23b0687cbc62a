//! Test-run orchestrator
//!
//! Thin wrapper over `cargo test` that applies name filters, controls
//! parallelism and writes an HTML run report into the configured reports
//! directory.

use clap::Parser;
use std::process::Command;
use tracing::{error, info};

use e2e_oxide::{logging, Settings};

#[derive(Parser, Debug)]
#[command(name = "e2e-oxide", version, about = "Run the end-to-end UI test suite")]
struct Args {
    /// Only run tests whose name contains this filter
    #[arg(short = 'm', long = "marker")]
    marker: Option<String>,

    /// Only run one integration test target (a file under tests/)
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Run tests in parallel (default is one test at a time)
    #[arg(short = 'p', long = "parallel")]
    parallel: bool,

    /// Also run tests marked ignored (the real-browser suite)
    #[arg(long = "include-ignored")]
    include_ignored: bool,

    /// Skip writing the HTML run report
    #[arg(long = "no-report")]
    no_report: bool,
}

fn main() {
    let args = Args::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };
    let _log_guard = match logging::init(&settings) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging init failed: {}", e);
            None
        }
    };

    let mut command = Command::new("cargo");
    command.arg("test");
    if let Some(file) = &args.file {
        command.arg("--test").arg(file);
    }
    if let Some(marker) = &args.marker {
        command.arg(marker);
    }
    command.arg("--");
    if !args.parallel {
        command.arg("--test-threads=1");
    }
    if args.include_ignored {
        command.arg("--include-ignored");
    }

    info!(?args, "Starting test run");
    let output = match command.output() {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "Failed to spawn cargo test");
            std::process::exit(2);
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    print!("{}", stdout);
    eprint!("{}", stderr);

    if !args.no_report {
        if let Err(e) = write_report(&settings, &args, &stdout, &stderr, output.status.success()) {
            error!(error = %e, "Failed to write run report");
        }
    }

    let code = output.status.code().unwrap_or(1);
    info!(code, "Test run finished");
    std::process::exit(code);
}

fn write_report(
    settings: &Settings,
    args: &Args,
    stdout: &str,
    stderr: &str,
    passed: bool,
) -> e2e_oxide::Result<()> {
    std::fs::create_dir_all(&settings.reports_dir)?;
    let path = settings.reports_dir.join("report.html");
    let status = if passed { "PASSED" } else { "FAILED" };
    let html = format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>E2E run report</title></head><body>\n\
         <h1>E2E run: {}</h1>\n\
         <p>Generated {} | filter: {} | target: {}</p>\n\
         <h2>Output</h2>\n<pre>{}</pre>\n\
         <h2>Diagnostics</h2>\n<pre>{}</pre>\n\
         </body></html>\n",
        status,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        escape_html(args.marker.as_deref().unwrap_or("<all>")),
        escape_html(args.file.as_deref().unwrap_or("<all>")),
        escape_html(stdout),
        escape_html(stderr),
    );
    std::fs::write(&path, html)?;
    info!(path = %path.display(), "Run report written");
    Ok(())
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

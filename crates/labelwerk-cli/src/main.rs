// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// labelwerk: generate a registration label PDF from a device address or code.
//
// Exit status is 0 when the label was written and 1 for any failure. Usage
// errors are reported by clap with status 2.

mod args;

use std::process::ExitCode;

use labelwerk_core::LabelConfig;
use labelwerk_core::error::Result;
use labelwerk_core::human_errors::humanize_error;
use labelwerk_core::types::classify;
use labelwerk_device::DeviceClient;
use labelwerk_document::{LabelInspector, LabelOutcome, LabelRequest, generate_label};
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    match run(&cli).await {
        Ok(outcome) => {
            report_saved(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "label generation failed");
            let human = humanize_error(&e);
            eprintln!("Error: {}", human.message);
            if !human.suggestion.is_empty() {
                eprintln!("  {}", human.suggestion);
            }
            eprintln!("Failed to generate label.");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<LabelOutcome> {
    let config = cli.resolve_config()?;
    let size = config.label_size()?;

    println!("Input: {}", cli.input);
    println!("Label dimensions: {size}");
    println!("Detected: {}", detected_kind(&cli.input));

    let client = DeviceClient::new(config.fetch_timeout())?;
    let request = build_request(&cli.input, &config)?;
    let outcome = generate_label(&request, &client, &config.output).await?;

    println!("Registration code: {}", outcome.code);
    Ok(outcome)
}

/// What the input will be treated as, judged on the same trimmed text the
/// job receives.
fn detected_kind(input: &str) -> &'static str {
    classify(input.trim()).describe()
}

fn build_request(input: &str, config: &LabelConfig) -> Result<LabelRequest> {
    Ok(LabelRequest {
        input: input.trim().to_owned(),
        size: config.label_size()?,
        credentials: config.credentials(),
        logo_path: Some(config.logo_path.clone()),
    })
}

fn report_saved(outcome: &LabelOutcome) {
    println!("PDF label saved as: {}", outcome.path.display());
    if !outcome.logo_drawn {
        println!("Note: no logo drawn");
    }

    // Read the file back so the reported size is what a printer will see.
    match LabelInspector::open(&outcome.path).and_then(|pdf| pdf.page_size_in(1)) {
        Ok((w, h)) => println!("Final label size: {w:.3}\" x {h:.3}\""),
        Err(e) => tracing::warn!(error = %e, "could not read back the written label"),
    }
}

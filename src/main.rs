use clap::Parser;
use leadgen::service::{self, ErrorResponse, ProspectRequest};
use leadgen::{Pipeline, PipelineConfig};
use serde::Serialize;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if args.health {
        print_json(&service::health(), args.pretty);
        return ExitCode::SUCCESS;
    }

    let config = match &args.config {
        Some(path) => PipelineConfig::from_file(path),
        None => Ok(PipelineConfig::default()),
    };
    let config = match config.map(|c| args.apply(c.with_env_overrides())) {
        Ok(config) => config,
        Err(e) => return fail(&e, args.pretty),
    };
    // Overrides from the command line are checked as well
    if let Err(e) = config.validate() {
        return fail(&e, args.pretty);
    }

    ::log::info!("Using WebDriver at {}", config.webdriver_url);
    let pipeline = Pipeline::from_config(config);

    let request = ProspectRequest {
        icp: args.icp.clone().unwrap_or_default(),
    };
    match service::handle_prospect(&pipeline, request).await {
        Ok(response) => {
            print_json(&response, args.pretty);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e, args.pretty),
    }
}

fn fail(error: &leadgen::LeadgenError, pretty: bool) -> ExitCode {
    ::log::error!("{}", error);
    print_json(&ErrorResponse::from(error), pretty);
    ExitCode::FAILURE
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => ::log::error!("Failed to serialize output: {}", e),
    }
}

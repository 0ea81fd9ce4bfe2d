// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use clap::Parser;
use edge_controller::application::{Application, Outcome};
use edge_controller::configuration::ControllerOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with_current_span(false)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        // stdout carries the command output
        .with_writer(std::io::stderr)
        .init();

    // get configuration options from flags and environment variables
    let options = ControllerOptions::parse();

    tracing::info!("[controller] {:?}", &options);

    let application = Application::build(options).await?;

    match application.run().await? {
        Outcome::Synthesized(summary) => println!("{summary}"),
        Outcome::Context(context) => println!("{}", serde_json::to_string_pretty(&context)?),
    }

    Ok(())
}

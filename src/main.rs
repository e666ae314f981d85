use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::Engine;
use clap::Parser;
use dvr::{Config, Interaction, Recorder};
use serde::Serialize;

/// Print a recorded HTTP interaction as JSON
#[derive(Debug, Parser)]
#[command(name = "dvr-inspect", version)]
struct Args {
    /// Encoded query snapshot; reads stdin when omitted
    path: Option<PathBuf>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Include bodies, base64 encoded
    #[arg(long)]
    bodies: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    request: Option<RequestSummary>,
    response: Option<ResponseSummary>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct RequestSummary {
    method: String,
    url: String,
    version: String,
    body_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    body_error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResponseSummary {
    status: String,
    version: String,
    body_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    body_error: Option<String>,
}

fn summarize(interaction: &Interaction, bodies: bool) -> Summary {
    let encode = |data: &[u8]| bodies.then(|| base64::engine::general_purpose::STANDARD.encode(data));
    let message = |err: &Option<anyhow::Error>| err.as_ref().map(|e| format!("{e:#}"));

    Summary {
        request: interaction.request.as_ref().map(|req| RequestSummary {
            method: req.method.clone(),
            url: req.url.to_string(),
            version: req.version.to_string(),
            body_len: interaction.request_body.len(),
            body: encode(&interaction.request_body),
            body_error: message(&interaction.request_body_error),
        }),
        response: interaction.response.as_ref().map(|resp| ResponseSummary {
            status: resp.status.clone(),
            version: resp.version.to_string(),
            body_len: interaction.response_body.len(),
            body: encode(&interaction.response_body),
            body_error: message(&interaction.response_body_error),
        }),
        error: message(&interaction.error),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    let data = match &args.path {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let recorder = Recorder::new(&config);
    let interaction = recorder.replay(&data).context("decoding snapshot")?;

    let summary = summarize(&interaction, args.bodies);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

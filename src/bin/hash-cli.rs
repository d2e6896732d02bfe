use std::io::Read;

use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hash-cli")]
#[command(about = "Client for the hash service", long_about = None)]
struct Cli {
    #[arg(short, long, env = "HASH_SERVICE_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash INPUT, or standard input when omitted
    Hash { input: Option<String> },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Hash { input } => {
            let body = match input {
                Some(input) => input,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let res = client.post(format!("{}/hash", base)).body(body).send().await?;
            let status = res.status();
            let text = res.text().await?;

            match hash_outcome(status, text) {
                Ok(digest) => println!("{}", digest),
                Err(message) => {
                    eprintln!("Error ({}): {}", status, message);
                    std::process::exit(1);
                }
            }
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: service returned status {}", status);
                std::process::exit(1);
            }

            let json: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

/// Digest on success, otherwise the message to report before exiting non-zero.
fn hash_outcome(status: StatusCode, body: String) -> Result<String, String> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(error_message(body))
    }
}

/// The `error` field of a JSON error body, or the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or(body)
}

//! Signing Bridge
//!
//! Line-oriented JSON-RPC over stdin/stdout for processes that need
//! exchange transactions signed. Logs go to stderr so stdout carries
//! only responses.

mod rpc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dex_core::config::SignerConfig;
use goldilocks_crypto::SigningKey;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::rpc::Bridge;

#[derive(Parser)]
#[command(author, version, about = "JSON-lines signing bridge for exchange transactions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve signing requests read line by line from stdin.
    Serve {
        /// Preload api keys from a config file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Preload api keys from SIGNER_* environment variables.
        #[arg(long, conflicts_with = "config")]
        from_env: bool,
    },
    /// Print the public key for a private key.
    Pubkey {
        #[arg(long)]
        private_key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sign_bridge=info,dex_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { config, from_env } => {
            let mut bridge = Bridge::new();
            if let Some(path) = config {
                let config = SignerConfig::from_file(&path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                bridge.preload(&config)?;
            } else if from_env {
                bridge.preload(&SignerConfig::from_env()?)?;
            }
            serve(bridge).await
        }
        Commands::Pubkey { private_key } => {
            let key = SigningKey::from_hex(&private_key).context("invalid private key")?;
            println!("{}", key.public_key_hex());
            Ok(())
        }
    }
}

async fn serve(mut bridge: Bridge) -> Result<()> {
    info!(keys = ?bridge.api_key_indices(), "Signing bridge reading stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        if let Some(response) = bridge.handle_line(&line) {
            let mut out = serde_json::to_string(&response)?;
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("Signing bridge stopped");
    Ok(())
}

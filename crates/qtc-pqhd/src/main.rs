//! QTC PQ-HD wallet generator.
//!
//! # Usage
//!
//! ```bash
//! # Generate a wallet into ./qti3_pqhd_wallet.json and print it
//! qtc-pqhd
//!
//! # Reproducible run for testing (never for real funds)
//! qtc-pqhd generate --output /tmp/w.json --rng-seed 00112233...
//!
//! # Check a stored record and decode an address
//! qtc-pqhd verify /tmp/w.json
//! qtc-pqhd address qtc1z...
//! ```
//!
//! Logs go to stderr. Stdout carries only the record document (or the
//! result of `verify` / `address`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qtc_pqhd::{Wallet, WalletConfig, WalletStore};
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// QTC PQ-HD wallet generator
#[derive(Parser, Debug)]
#[command(name = "qtc-pqhd")]
#[command(about = "Generate and check QTC PQ-HD (Kyber1024 + Dilithium3) wallets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive a new wallet, store it and print the record (default)
    Generate(GenerateArgs),

    /// Re-derive a stored record and check every field
    Verify {
        /// Record to check
        #[arg(default_value = qtc_pqhd::store::DEFAULT_WALLET_FILE)]
        path: PathBuf,
    },

    /// Decode an address and print its witness version and program
    Address {
        /// Address to decode
        address: String,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Where to write the record
    #[arg(short, long, default_value = qtc_pqhd::store::DEFAULT_WALLET_FILE)]
    output: PathBuf,

    /// Replace an existing record
    #[arg(long)]
    force: bool,

    /// Do not print the record to stdout
    #[arg(long)]
    no_stdout: bool,

    /// Seed a ChaCha20 random source instead of the OS (32 bytes hex, testing only)
    #[arg(long, value_parser = parse_rng_seed)]
    rng_seed: Option<[u8; 32]>,
}

fn parse_rng_seed(s: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(s).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("expected 32 bytes, got {}", b.len()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = cli
        .command
        .unwrap_or_else(|| Command::Generate(GenerateArgs::default_cli()));

    match execute(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Bypasses the log filter.
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

impl GenerateArgs {
    fn default_cli() -> Self {
        Self {
            output: PathBuf::from(qtc_pqhd::store::DEFAULT_WALLET_FILE),
            force: false,
            no_stdout: false,
            rng_seed: None,
        }
    }
}

async fn execute(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Generate(args) => generate(args).await,
        Command::Verify { path } => verify(path).await,
        Command::Address { address } => inspect(&address),
    }
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = WalletConfig {
        output: args.output,
        overwrite: args.force,
        emit_stdout: !args.no_stdout,
        ..WalletConfig::default()
    };
    let wallet = Wallet::new(config.file_store(), config);

    tracing::info!("starting QTC PQ-HD wallet generation");

    let mut stdout = std::io::stdout().lock();
    let generated = match args.rng_seed {
        Some(seed) => {
            tracing::warn!("using a seeded random source; the wallet is reproducible and NOT safe for funds");
            wallet.run(&mut ChaCha20Rng::from_seed(seed), &mut stdout).await
        }
        None => wallet.run(&mut OsRng, &mut stdout).await,
    }
    .with_context(|| format!("wallet generation failed ({})", wallet.store().location()))?;

    tracing::info!(address = generated.record.address(), "wallet generation complete");
    Ok(())
}

async fn verify(path: PathBuf) -> anyhow::Result<()> {
    let config = WalletConfig {
        output: path,
        ..WalletConfig::default()
    };
    let wallet = Wallet::new(config.file_store(), config);

    let report = wallet
        .verify()
        .await
        .with_context(|| format!("{} failed verification", wallet.store().location()))?;

    println!("{}", report.address);
    Ok(())
}

fn inspect(address: &str) -> anyhow::Result<()> {
    let config = WalletConfig::default();
    let wallet = Wallet::new(config.file_store(), config);

    let (version, program) = wallet
        .inspect_address(address)
        .with_context(|| format!("invalid address {address}"))?;

    println!("witness_version: {version}");
    println!("program: {}", program.to_hex());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_generate() {
        let cli = Cli::try_parse_from(["qtc-pqhd"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "qtc-pqhd",
            "generate",
            "-o",
            "w.json",
            "--force",
            "--no-stdout",
            "--rng-seed",
            &"ab".repeat(32),
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.output, PathBuf::from("w.json"));
                assert!(args.force);
                assert!(args.no_stdout);
                assert_eq!(args.rng_seed, Some([0xab; 32]));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rng_seed_must_be_32_bytes() {
        assert!(parse_rng_seed(&"00".repeat(31)).is_err());
        assert!(parse_rng_seed("zz").is_err());
        assert_eq!(parse_rng_seed(&"01".repeat(32)).unwrap(), [1; 32]);
    }

    #[test]
    fn test_verify_defaults_to_wallet_file() {
        let cli = Cli::try_parse_from(["qtc-pqhd", "verify"]).unwrap();
        match cli.command {
            Some(Command::Verify { path }) => {
                assert_eq!(path, PathBuf::from("qti3_pqhd_wallet.json"))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

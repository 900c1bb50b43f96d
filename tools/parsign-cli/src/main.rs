//! Parsign Command Line Tool
//!
//! Provides commands for working with signed parameter sets:
//! - sign: Compute the signature for a JSON parameter file
//! - canonicalize: Print the canonical string a signature is computed over
//! - digest: Raw MD5 of a string or file
//! - verify: Check a provided signature against a parameter file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use parsign_canonical::{canonical_string, md5, sign, verify_signature};
use parsign_core::{DigestCase, ParameterSet, SigningConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parsign")]
#[command(version)]
#[command(about = "Parsign Command Line Tool - Sign, canonicalize, and verify parameter sets")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a parameter file
    #[command(about = "Compute the signature for a JSON parameter file")]
    Sign {
        /// Path to a JSON object of scalar parameters
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Shared secret, injected under the reserved pseudo-parameter
        #[arg(long, short)]
        secret: Option<String>,

        /// Render the digest in lowercase hex
        #[arg(long)]
        lowercase: bool,

        /// Also print the canonical string the digest covers
        #[arg(long)]
        show_canonical: bool,
    },

    /// Print the canonical string for a parameter file
    #[command(about = "Output the canonical key=value&... string")]
    Canonicalize {
        /// Path to a JSON object of scalar parameters
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Shared secret, injected under the reserved pseudo-parameter
        #[arg(long, short)]
        secret: Option<String>,
    },

    /// Compute a raw MD5 digest
    #[command(about = "Compute the lowercase MD5 digest of TEXT or a file")]
    Digest {
        /// Text to digest
        #[arg(value_name = "TEXT", conflicts_with = "file")]
        text: Option<String>,

        /// Digest the contents of a file instead
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Verify a signature over a parameter file
    #[command(about = "Recompute and compare a signature")]
    Verify {
        /// Path to a JSON object of scalar parameters
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// The signature to check
        #[arg(long)]
        signature: String,

        /// Shared secret, injected under the reserved pseudo-parameter
        #[arg(long, short)]
        secret: Option<String>,

        /// Expect a lowercase digest
        #[arg(long)]
        lowercase: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sign {
            file,
            secret,
            lowercase,
            show_canonical,
        } => handle_sign(&file, secret.as_deref(), lowercase, show_canonical),
        Commands::Canonicalize { file, secret } => handle_canonicalize(&file, secret.as_deref()),
        Commands::Digest { text, file } => handle_digest(text.as_deref(), file.as_deref()),
        Commands::Verify {
            file,
            signature,
            secret,
            lowercase,
        } => handle_verify(&file, &signature, secret.as_deref(), lowercase),
    }
}

fn config_for(lowercase: bool) -> SigningConfig {
    let config = SigningConfig::default();
    if lowercase {
        config.with_digest_case(DigestCase::Lower)
    } else {
        config
    }
}

fn load_params(file: &PathBuf) -> Result<ParameterSet> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    ParameterSet::from_json_str(&json)
        .with_context(|| format!("Failed to load {} as a parameter set", file.display()))
}

fn handle_sign(
    file: &PathBuf,
    secret: Option<&str>,
    lowercase: bool,
    show_canonical: bool,
) -> Result<()> {
    let params = load_params(file)?;
    let config = config_for(lowercase);

    if show_canonical {
        println!("{}", canonical_string(&params, secret, &config));
    }
    println!("{}", sign(&params, secret, &config));

    Ok(())
}

fn handle_canonicalize(file: &PathBuf, secret: Option<&str>) -> Result<()> {
    let params = load_params(file)?;
    println!(
        "{}",
        canonical_string(&params, secret, &SigningConfig::default())
    );
    Ok(())
}

fn handle_digest(text: Option<&str>, file: Option<&std::path::Path>) -> Result<()> {
    let input = match (text, file) {
        (Some(text), None) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        (None, None) => bail!("Provide TEXT or --file"),
        (Some(_), Some(_)) => unreachable!("clap rejects the combination"),
    };

    println!("{}", md5(&input));
    Ok(())
}

fn handle_verify(
    file: &PathBuf,
    signature: &str,
    secret: Option<&str>,
    lowercase: bool,
) -> Result<()> {
    let params = load_params(file)?;
    let config = config_for(lowercase);

    if verify_signature(&params, secret, signature, &config) {
        println!("Signature OK");
        Ok(())
    } else {
        bail!(
            "Signature mismatch: expected {}",
            sign(&params, secret, &config)
        );
    }
}

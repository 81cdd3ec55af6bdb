use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::DecodeLimits;
use log::{debug, info, warn};
use schema::{schema_hash, Schema};
use serde::Serialize;
use tools::{
    decode, encode, format_hex, json_to_value_for, load_schema, parse_hex, value_to_json,
    DEFAULT_CAPACITY,
};

#[derive(Parser)]
#[command(
    name = "wirepack-tools",
    version,
    about = "wirepack encoding, decoding and schema tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a JSON value into wirepack bytes.
    Encode {
        /// Path to the JSON value.
        value_file: PathBuf,
        /// Schema JSON; the value is written self-describing when omitted.
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Write raw bytes here instead of printing hex.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Initial output buffer size in bytes.
        #[arg(long, default_value_t = DEFAULT_CAPACITY)]
        capacity: usize,
    },
    /// Decode wirepack bytes into JSON.
    Decode {
        /// Path to the encoded bytes.
        input_file: PathBuf,
        /// Schema JSON; the bytes are read self-describing when omitted.
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Treat the input file as hex text.
        #[arg(long)]
        hex: bool,
        /// Decode limits for untrusted input.
        #[arg(long, value_enum, default_value_t = LimitsPreset::Default)]
        limits: LimitsPreset,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Print the fingerprint of a schema.
    Hash {
        /// Path to the schema JSON.
        schema_file: PathBuf,
        /// Print a JSON report instead of the bare hash.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LimitsPreset {
    Default,
    Testing,
    Unlimited,
}

impl LimitsPreset {
    fn limits(self) -> DecodeLimits {
        match self {
            Self::Default => DecodeLimits::default(),
            Self::Testing => DecodeLimits::for_testing(),
            Self::Unlimited => DecodeLimits::unlimited(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

#[derive(Serialize)]
struct HashReport<'a> {
    schema: &'a str,
    kind: &'static str,
    hash: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            value_file,
            schema,
            out,
            capacity,
        } => {
            let schema = schema.as_deref().map(read_schema).transpose()?;
            let text = fs::read_to_string(&value_file)
                .with_context(|| format!("read value {}", value_file.display()))?;
            let json: serde_json::Value =
                serde_json::from_str(&text).context("parse value json")?;
            let value = match &schema {
                Some(schema) => json_to_value_for(schema, &json)?,
                None => tools::json_to_value(&json),
            };
            debug!("encoding {} value", value.kind_name());

            let bytes = encode(schema.as_ref(), &value, capacity)?;
            info!("encoded {} bytes", bytes.len());
            match out {
                Some(path) => fs::write(&path, &bytes)
                    .with_context(|| format!("write output {}", path.display()))?,
                None => println!("{}", format_hex(&bytes)),
            }
        }
        Command::Decode {
            input_file,
            schema,
            hex,
            limits,
            format,
        } => {
            let schema = schema.as_deref().map(read_schema).transpose()?;
            let bytes = if hex {
                let text = fs::read_to_string(&input_file)
                    .with_context(|| format!("read input {}", input_file.display()))?;
                parse_hex(&text)?
            } else {
                fs::read(&input_file)
                    .with_context(|| format!("read input {}", input_file.display()))?
            };
            debug!("decoding {} bytes with {limits:?} limits", bytes.len());

            let decoded = decode(schema.as_ref(), &bytes, &limits.limits())?;
            if decoded.trailing > 0 {
                warn!(
                    "{} trailing bytes after offset {}",
                    decoded.trailing, decoded.consumed
                );
            }
            match format {
                DecodeFormat::Json => {
                    let json = value_to_json(&decoded.value)?;
                    let json = serde_json::to_string_pretty(&json).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => println!("{}", decoded.value),
            }
        }
        Command::Hash { schema_file, json } => {
            let schema = read_schema(&schema_file)?;
            let hash = format!("0x{:016x}", schema_hash(&schema));
            if json {
                let path = schema_file.display().to_string();
                let report = HashReport {
                    schema: &path,
                    kind: schema.kind_name(),
                    hash,
                };
                let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                println!("{json}");
            } else {
                println!("{hash}");
            }
        }
    }
    Ok(())
}

fn read_schema(path: &Path) -> Result<Schema> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read schema {}", path.display()))?;
    load_schema(&contents).with_context(|| format!("load schema {}", path.display()))
}

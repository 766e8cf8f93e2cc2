//! dohwire
//!
//! Builds DNS-over-HTTPS query bodies and decodes response bodies. The
//! bytes produced by `query` are what a client POSTs with content type
//! `application/dns-message`; `decode` reads what comes back.

mod config;
mod logging;
mod present;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use dohwire_proto::{
    create_query, Class, Message, Name, PaddingPolicy, ParseConfig, Question, TrailingData, Type,
};
use logging::{init_tracing, parse_log_level, LogConfig, LogFormat};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Build and decode DNS-over-HTTPS wire messages
#[derive(Parser, Debug)]
#[command(name = "dohwire")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE", env = "DOHWIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a query message
    Query {
        /// Domain name to query (ASCII; convert IDNs to punycode first)
        name: String,

        /// Record type (mnemonic, TYPEnnn or number)
        #[arg(short = 't', long = "type", default_value = "A")]
        qtype: Type,

        /// Record class (mnemonic, CLASSnnn or number)
        #[arg(short = 'c', long = "class", default_value = "IN")]
        qclass: Class,

        /// Message ID
        #[arg(long, default_value_t = 0)]
        id: u16,

        /// Set the DNSSEC OK bit in the OPT record
        #[arg(long)]
        dnssec: bool,

        /// Padding block length (0 disables padding)
        #[arg(long, value_name = "BYTES")]
        block: Option<u16>,

        /// Write lowercase hex instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Decode a response message
    Decode {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Fail on bytes after the last record
        #[arg(long)]
        strict: bool,

        /// Keep EDNS padding options in the output
        #[arg(long)]
        retain_padding: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// dig-like text
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

/// Initialize logging/tracing subsystem
fn init_logging(config: &Config, cli: &Cli) {
    let level = parse_log_level(cli.log_level.as_deref().unwrap_or(&config.logging.level));
    let format = match cli.log_format {
        Some(LogFormatArg::Json) => LogFormat::Json,
        Some(LogFormatArg::Text) => LogFormat::Text,
        None => config.logging.format,
    };

    init_tracing(&LogConfig { level, format });
}

/// Turns user input into a query name.
///
/// ASCII letters are lowercased before validation. Anything outside ASCII
/// is refused; internationalized names must arrive already in punycode.
fn query_name(input: &str) -> Result<Name> {
    if !input.is_ascii() {
        bail!("\"{input}\" is not ASCII; convert internationalized names to punycode first");
    }
    Name::from_ascii(&input.to_ascii_lowercase())
        .with_context(|| format!("invalid domain name \"{input}\""))
}

/// Decodes hex text, ignoring whitespace.
fn decode_hex(text: &[u8]) -> Result<Vec<u8>> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    HEXLOWER_PERMISSIVE
        .decode(&compact)
        .context("input is not valid hex")
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush().context("failed to write stdout")
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_query(
    config: &Config,
    name: &str,
    qtype: Type,
    qclass: Class,
    id: u16,
    dnssec: bool,
    block: Option<u16>,
    hex: bool,
    output: Option<&Path>,
) -> Result<()> {
    let qname = query_name(name)?;
    let mut query = create_query([Question::new_generic(qname, qtype, qclass)]);
    query.header.id = id;
    if let Some(opt) = query.opt_mut() {
        opt.dnssec_ok = dnssec;
    }

    let mut serialize = config.codec.serialize.clone();
    if let Some(block) = block {
        serialize.padding = if block == 0 {
            PaddingPolicy::None
        } else {
            PaddingPolicy::Block(block)
        };
    }

    let wire = query
        .serialize_query_with(&serialize)
        .context("failed to serialize query")?;
    info!(name, %qtype, len = wire.len(), "built query");

    if hex {
        let mut text = HEXLOWER.encode(&wire);
        text.push('\n');
        write_output(output, text.as_bytes())
    } else {
        write_output(output, &wire)
    }
}

fn run_decode(
    input: Option<&Path>,
    hex: bool,
    format: OutputFormat,
    parse: &ParseConfig,
) -> Result<()> {
    let raw = read_input(input)?;
    let data = if hex { decode_hex(&raw)? } else { raw };
    debug!(len = data.len(), "decoding message");

    let msg = Message::parse_with(&data, 0, parse).context("failed to parse DNS message")?;
    let rendered = match format {
        OutputFormat::Json => present::to_json(&msg)?,
        OutputFormat::Text => present::to_text(&msg),
    };

    println!("{rendered}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config.validate().context("Invalid configuration")?;

    init_logging(&config, &cli);

    match &cli.command {
        Commands::Query {
            name,
            qtype,
            qclass,
            id,
            dnssec,
            block,
            hex,
            output,
        } => run_query(
            &config,
            name,
            *qtype,
            *qclass,
            *id,
            *dnssec,
            *block,
            *hex,
            output.as_deref(),
        ),
        Commands::Decode {
            input,
            hex,
            format,
            strict,
            retain_padding,
        } => {
            let mut parse = config.codec.parse.clone();
            if *strict {
                parse.trailing_data = TrailingData::Strict;
            }
            parse.retain_padding |= *retain_padding;
            run_decode(input.as_deref(), *hex, *format, &parse)
        }
    }
}

//! Command line front end for 125KHz RFID reader/writers

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgGroup, CommandFactory, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rfidrw::constants::{DEFAULT_BAUD_RATE, DEFAULT_RESPONSE_TIMEOUT};
use rfidrw::{codec, Reader, Token};

/// Read, write and query 125KHz RFID reader/writers
#[derive(Parser, Debug)]
#[command(name = "rfidrw", version, long_about = None)]
#[command(group(ArgGroup::new("action").required(true).args(["read", "write", "info"])))]
struct Args {
    /// Read token
    #[arg(short, long)]
    read: bool,

    /// Write token
    #[arg(short, long)]
    write: bool,

    /// Reader information
    #[arg(short, long)]
    info: bool,

    /// Path to serial communication device (bare names are looked up in /dev)
    #[arg(short, long)]
    device: String,

    /// Trace serial commands
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Input/output type
    #[arg(short = 't', long = "type", value_enum, default_value_t = Format::Hex)]
    format: Format,

    /// Seconds to wait for each reply
    #[arg(short = 'T', long, default_value_t = DEFAULT_RESPONSE_TIMEOUT.as_secs_f64())]
    timeout: f64,

    /// Serial line speed
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Lock the card after writing
    #[arg(long, requires = "write")]
    lock: bool,

    /// (write only) token to write
    data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Hex,
    Dec,
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Info,
    Read,
    Write { token: Token, locked: bool },
}

impl Args {
    /// Resolve flags into one action, `None` on a bad combination
    fn action(&self) -> Option<Result<Action>> {
        match (self.info, self.read, self.write, self.data.as_deref()) {
            (true, false, false, None) => Some(Ok(Action::Info)),
            (false, true, false, None) => Some(Ok(Action::Read)),
            (false, false, true, Some(data)) => Some(
                parse_token(data, self.format).map(|token| Action::Write {
                    token,
                    locked: self.lock,
                }),
            ),
            _ => None,
        }
    }

    fn response_timeout(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.timeout)
            .with_context(|| format!("invalid timeout {}", self.timeout))
    }
}

fn parse_token(data: &str, format: Format) -> Result<Token> {
    let token = match format {
        Format::Hex => Token::parse_hex(data),
        Format::Dec => Token::parse_decimal(data),
    };
    token.with_context(|| format!("invalid token {:?}", data))
}

fn render_token(raw: &[u8], format: Format) -> String {
    match format {
        Format::Hex => codec::bytes_to_hex(raw),
        Format::Dec => codec::bytes_to_token(raw).to_string(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args, action: Action) -> Result<()> {
    let mut reader = Reader::open_with_baud_rate(&args.device, args.baud)
        .with_context(|| format!("opening {}", args.device))?
        .with_response_timeout(args.response_timeout()?);

    debug!("Running {:?}", action);

    match action {
        Action::Info => {
            println!("{}", reader.get_info()?);
        }
        Action::Read => match reader.read_token_raw()? {
            Some(raw) => println!("{}", render_token(&raw, args.format)),
            None => println!("No card present"),
        },
        Action::Write { token, locked } => {
            reader.write_token_raw(&token.to_bytes(), locked)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let action = match args.action() {
        Some(Ok(action)) => action,
        Some(Err(e)) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(1);
        }
        None => {
            let _ = Args::command().print_help();
            return ExitCode::from(1);
        }
    };

    init_logging(args.verbose);

    match run(&args, action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

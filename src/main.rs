//! `aesstream`: encrypt or decrypt files and pipes with a passphrase.
//!
//! ```text
//! tar cf - dir | gzip | AESPW=secret aesstream -k AESPW -o backup.tgz.aes
//! aesstream -d -o backup.tgz backup.tgz.aes
//! aesstream -t backup.tgz.aes            # authenticate only
//! aesstream -e -o notes.txt notes.txt    # in place
//! ```

use aesstream_rs::aliases::PasswordString;
use aesstream_rs::consts::{DEFAULT_KDF_ROUNDS, MAX_CHUNK_CAP};
use aesstream_rs::{hash_password, os_rng, run, run_file, Operation, StreamConfig};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const PROMPT_ATTEMPTS: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "aesstream",
    version,
    about = "Portable, pipe-friendly file encryption with AES-256-CTR and per-chunk HMAC-SHA256",
    long_about = "Encrypts or decrypts INFILE (default stdin) to FILE (default stdout). \
                  Keys are derived from the passphrase with PBKDF2-HMAC-SHA512. \
                  If INFILE and the output are the same file, the file is rewritten in place \
                  through a temporary file and only replaced once the whole stream succeeded."
)]
#[command(group(ArgGroup::new("mode").args(["encrypt", "decrypt", "test"])))]
struct Cli {
    /// Encrypt (default)
    #[arg(short = 'e', long)]
    encrypt: bool,

    /// Decrypt
    #[arg(short = 'd', long)]
    decrypt: bool,

    /// Authenticate the whole input without writing any output
    #[arg(short = 't', long)]
    test: bool,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Read the password from environment variable VAR instead of prompting
    #[arg(short = 'k', long = "env-pass", value_name = "VAR")]
    env_pass: Option<String>,

    /// Plaintext bytes per chunk when encrypting; accepts k, M, G suffixes
    #[arg(short = 'B', long = "chunk-size", value_name = "SIZE", default_value = "64k", value_parser = parse_size)]
    chunk_size: u32,

    /// PBKDF2 rounds when encrypting
    #[arg(long, value_name = "N", default_value_t = DEFAULT_KDF_ROUNDS)]
    rounds: u32,

    /// More log output on stderr (repeat for more)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Input file [default: stdin]
    infile: Option<PathBuf>,
}

impl Cli {
    fn operation(&self) -> Operation {
        if self.decrypt {
            Operation::Decrypt
        } else if self.test {
            Operation::Verify
        } else {
            Operation::Encrypt
        }
    }
}

fn parse_size(arg: &str) -> Result<u32, String> {
    let arg = arg.trim();
    let (digits, multiplier) = match arg.chars().last() {
        Some('k' | 'K') => (&arg[..arg.len() - 1], 1u64 << 10),
        Some('m' | 'M') => (&arg[..arg.len() - 1], 1u64 << 20),
        Some('g' | 'G') => (&arg[..arg.len() - 1], 1u64 << 30),
        _ => (arg, 1u64),
    };
    let value: u64 = digits
        .parse()
        .map_err(|_| format!("invalid size '{arg}'"))?;
    let bytes = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size '{arg}' too large"))?;
    if bytes == 0 || bytes > u64::from(MAX_CHUNK_CAP) {
        return Err(format!("size must be between 1 and {MAX_CHUNK_CAP} bytes"));
    }
    Ok(bytes as u32)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn get_password(env: Option<&str>, confirm: bool) -> Result<PasswordString> {
    if let Some(var) = env {
        let value = std::env::var(var)
            .with_context(|| format!("password variable {var} is not set"))?;
        return Ok(PasswordString::new(value));
    }

    for attempt in 1..=PROMPT_ATTEMPTS {
        let first = rpassword::prompt_password("Enter password: ")
            .context("unable to read password")?;
        if !confirm {
            return Ok(PasswordString::new(first));
        }
        let second = rpassword::prompt_password("Re-enter password: ")
            .context("unable to read password")?;
        if first == second {
            return Ok(PasswordString::new(first));
        }
        if attempt < PROMPT_ATTEMPTS {
            eprintln!("Passwords don't match. Try again..");
        }
    }
    bail!("too many mistakes")
}

/// Where the result goes. Verification produces nothing, so it never opens
/// (and never truncates) an output file.
fn open_output(op: Operation, output: Option<&Path>) -> Result<Box<dyn Write>> {
    if op == Operation::Verify {
        return Ok(Box::new(io::sink()));
    }
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let op = cli.operation();
    if op == Operation::Encrypt && cli.output.is_none() && io::stdout().is_terminal() {
        bail!("refusing to write encrypted data to a terminal; use -o or redirect stdout");
    }

    let password = get_password(cli.env_pass.as_deref(), op == Operation::Encrypt)?;
    if password.expose_secret().is_empty() {
        bail!("empty password");
    }
    let digest = hash_password(&password);
    drop(password);

    let config = StreamConfig::new()
        .with_kdf_rounds(cli.rounds)
        .with_chunk_cap(cli.chunk_size);
    let mut rng = os_rng()?;

    let bytes = match (&cli.infile, &cli.output) {
        (Some(input), Some(output)) => {
            run_file(op, input, output, &digest, &config, &mut rng).with_context(|| {
                format!("{} -> {} failed", input.display(), output.display())
            })?
        }
        (input, output) => {
            let reader: Box<dyn Read> = match input {
                Some(path) => Box::new(BufReader::new(
                    File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
                )),
                None => Box::new(io::stdin().lock()),
            };
            let mut writer = open_output(op, output.as_deref())?;
            let n = run(op, reader, &mut writer, &digest, &config, &mut rng)
                .with_context(|| format!("{op:?} failed"))?;
            writer.flush()?;
            n
        }
    };

    info!(bytes, ?op, "done");
    Ok(())
}

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use wenyue_fs::{
    EncodingId, SUPPORTED_ENCODINGS, detect_file_with_config, read_text_with_config,
    try_read_text, try_write_text, write_text_with_config,
};

mod logging;
mod settings;

use logging::Verbosity;
use settings::Settings;

/// Open and re-save text files in Unicode and legacy Chinese encodings.
#[derive(Debug, Parser)]
#[command(name = "wenyue", version)]
struct Cli {
    /// Settings file (default: first of ~/.wenyue/config.toml,
    /// ~/.config/wenyue/config.toml, ./.wenyue.toml, ./wenyue.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the supported encodings
    Encodings,
    /// Print the detected encoding of each file
    Detect {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print a file's text, decoded and with `\n` line breaks
    Cat {
        path: PathBuf,
        /// Decode with this encoding instead of detecting it
        #[arg(short, long)]
        encoding: Option<EncodingId>,
    },
    /// Re-save a file under another encoding
    Convert {
        path: PathBuf,
        /// Source encoding (detected when omitted)
        #[arg(long)]
        from: Option<EncodingId>,
        /// Target encoding (settings' default_encoding when omitted)
        #[arg(long)]
        to: Option<EncodingId>,
        /// Write here instead of overwriting the source
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Save standard input to a file
    Write {
        path: PathBuf,
        /// Target encoding (settings' default_encoding when omitted)
        #[arg(short, long)]
        encoding: Option<EncodingId>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    run(cli.command, &settings)
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match command {
        Command::Encodings => {
            for name in SUPPORTED_ENCODINGS {
                writeln!(stdout, "{name}")?;
            }
        }
        Command::Detect { paths } => {
            let config = settings.detection_config();
            for path in paths {
                let result = detect_file_with_config(&path, &config);
                writeln!(stdout, "{}\t{}\t{}", path.display(), result.encoding, result.method)?;
            }
        }
        Command::Cat { path, encoding } => {
            let text = read_text_with_config(&path, encoding, &settings.load_config());
            stdout.write_all(text.as_bytes())?;
        }
        Command::Convert { path, from, to, output } => {
            // Refuse to save over the source when it could not be decoded.
            let content = try_read_text(&path, from, &settings.load_config())
                .with_context(|| format!("cannot read {}", path.display()))?;
            let target = to.unwrap_or(settings.default_encoding);
            let destination = output.unwrap_or_else(|| path.clone());

            let result = try_write_text(&destination, &content.text, target, &settings.save_config())
                .with_context(|| format!("cannot save {} as {target}", destination.display()))?;
            tracing::info!(
                from = %content.encoding,
                to = %target,
                bytes = result.bytes_written,
                "converted {}",
                path.display()
            );
        }
        Command::Write { path, encoding } => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("standard input is not valid UTF-8")?;
            let target = encoding.unwrap_or(settings.default_encoding);
            if !write_text_with_config(&path, &text, target, &settings.save_config()) {
                bail!("failed to save {} as {target}", path.display());
            }
        }
    }

    stdout.flush()?;
    Ok(())
}

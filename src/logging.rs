//! Tracing subscriber setup for the `wenyue` binary.
//!
//! Logs go to stderr so they never mix with decoded text on stdout.
//!
//! # Priority (highest to lowest)
//!
//! 1. `WENYUE_LOG` env var (per-target directives, e.g. `wenyue_fs=debug,warn`)
//! 2. `RUST_LOG` env var
//! 3. CLI flags (`-v` → debug, `-q` → error)
//! 4. Default level: `warn`

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Verbosity level derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Verbose wins when both flags are set.
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber. Call once, before settings are loaded.
pub fn init_subscriber(verbosity: Verbosity) {
    let env_directives = ["WENYUE_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|var| std::env::var(var).ok());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(build_env_filter(env_directives.as_deref(), verbosity))
        .init();
}

/// Env directives if present and parseable, else the flag-derived level.
fn build_env_filter(env_directives: Option<&str>, verbosity: Verbosity) -> EnvFilter {
    env_directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| {
            EnvFilter::default().add_directive(LevelFilter::from_level(verbosity.default_level()).into())
        })
}

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use flag_core::model::Catalog;
use services::quiz::DEFAULT_TOTAL_ROUNDS;
use services::{QuizConfig, QuizSession, RngSource};
use tracing_subscriber::EnvFilter;

mod play;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRounds { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRounds { raw } => write!(f, "invalid --rounds value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--rounds <n>] [--seed <u64>] [--catalog <path.json>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --rounds {DEFAULT_TOTAL_ROUNDS}");
    eprintln!("  built-in catalog of eleven flags, unseeded randomness");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLAG_QUIZ_ROUNDS, FLAG_QUIZ_SEED, FLAG_QUIZ_CATALOG, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    rounds: u32,
    seed: Option<u64>,
    catalog: Option<PathBuf>,
}

impl Args {
    /// Environment values that fail to parse are ignored; flags win over them.
    fn parse(
        env: impl Fn(&str) -> Option<String>,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        let mut rounds = env("FLAG_QUIZ_ROUNDS")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_TOTAL_ROUNDS);
        let mut seed = env("FLAG_QUIZ_SEED").and_then(|value| value.trim().parse::<u64>().ok());
        let mut catalog = env("FLAG_QUIZ_CATALOG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--rounds" => {
                    let value = require_value(args, "--rounds")?;
                    rounds = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidRounds { raw: value.clone() })?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            rounds,
            seed,
            catalog,
        })
    }
}

fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read catalog {}: {err}", path.display()))?;
    Ok(Catalog::from_json(&json)?)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(|key| std::env::var(key).ok(), &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config = QuizConfig::new(args.rounds)?;
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => Catalog::flags(),
    };
    tracing::debug!(
        rounds = config.total_rounds(),
        seed = ?args.seed,
        catalog_len = catalog.len(),
        "configuration resolved"
    );

    let mut session = QuizSession::new(catalog, config);
    if let Some(seed) = args.seed {
        session = session.with_random(RngSource::seeded(seed));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    play::run_game(&mut session, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

fn main() {
    // Logs go to stderr so they never interleave with the prompts on stdout.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("services=info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

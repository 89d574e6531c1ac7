// Grantime CLI - grant compliance assistant in the terminal

mod exit_codes;
mod render;
mod repl;
mod util;

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use grantime_chat::{ChatSession, Latency};
use grantime_compliance::fixtures::{builtin_files, builtin_partners};
use grantime_compliance::{
    build_matcher, evaluate, ComplianceError, ComplianceMatcher, GrantStore, Inquiry,
};
use grantime_config::Settings;
use grantime_core::{parse_amount_cents, MatcherMode};
use tracing_subscriber::EnvFilter;

use exit_codes::{grants_exit_code, EXIT_ERROR, EXIT_SETTINGS, EXIT_SUCCESS, EXIT_USAGE};

/// Environment variable holding the log filter (env-filter syntax).
const LOG_ENV: &str = "GRANTIME_LOG";

#[derive(Parser)]
#[command(name = "grantime")]
#[command(about = "Check expenses against grant agreement restrictions")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one compliance question and print the decision
    #[command(after_help = "\
Examples:
  grantime ask 'Can we use $15,000 from the Healthcare Foundation grant for emergency shelter setup?'
  grantime ask 'Can we spend $5000 on emergency medication?' --mode keyword
  grantime ask 'Is office rent allowed?' --amount 2,400 --mode keyword --json")]
    Ask {
        /// The question, in plain language
        question: String,

        /// Amount in dollars, overriding any amount in the question
        #[arg(long, value_name = "DOLLARS")]
        amount: Option<String>,

        /// Matcher to answer with (default from settings)
        #[arg(long)]
        mode: Option<Mode>,

        /// Fixed seed for confidence scores
        #[arg(long)]
        seed: Option<u64>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive chat with the assistant
    #[command(after_help = "\
Examples:
  grantime chat
  grantime chat --mode keyword --no-delay
  printf 'rent $900\\nstaff salaries $2,000\\n' | grantime chat --mode keyword --no-delay")]
    Chat {
        /// Matcher to answer with (default from settings)
        #[arg(long)]
        mode: Option<Mode>,

        /// Fixed seed for confidence scores and response latency
        #[arg(long)]
        seed: Option<u64>,

        /// Fixed response delay in milliseconds
        #[arg(long, value_name = "MS", conflicts_with = "no_delay")]
        delay_ms: Option<u64>,

        /// Answer immediately
        #[arg(long)]
        no_delay: bool,
    },

    /// List grant agreements and their balances
    Grants {
        /// Grant fixture file (default from settings, else built-in)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show grant partners and agreement files
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a grant fixture file
    #[command(after_help = "\
Exit codes:
  0   file is valid
  2   file could not be read
  10  file failed to parse or validate")]
    Validate {
        /// Grant fixture TOML file
        file: PathBuf,
    },

    /// Settings file management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the settings file path
    Path,
    /// Write a default settings file
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Scripted,
    Keyword,
}

impl From<Mode> for MatcherMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Scripted => MatcherMode::Scripted,
            Mode::Keyword => MatcherMode::Keyword,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
        "\nlog:     GRANTIME_LOG (env-filter syntax, default warn)",
    )
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Also installs the `log` bridge, so library records show up here.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        None => {
            eprintln!("Usage: grantime <command> [options]");
            eprintln!("       grantime --help for more information");
            Ok(())
        }
        Some(Commands::Ask { question, amount, mode, seed, json }) => {
            cmd_ask(&question, amount.as_deref(), mode, seed, json)
        }
        Some(Commands::Chat { mode, seed, delay_ms, no_delay }) => {
            cmd_chat(mode, seed, delay_ms, no_delay)
        }
        Some(Commands::Grants { file, json }) => cmd_grants(file, json),
        Some(Commands::Dashboard { json }) => cmd_dashboard(json),
        Some(Commands::Validate { file }) => cmd_validate(&file),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => cmd_config_path(),
            ConfigCommands::Init => cmd_config_init(),
        },
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SETTINGS, message: msg.into(), hint: None }
    }

    /// Create error from a grant store error with the proper exit code.
    pub fn grants(err: ComplianceError, path: &Path) -> Self {
        let code = grants_exit_code(&err);
        let hint = match &err {
            ComplianceError::Io(_) => Some("check the file path".to_string()),
            ComplianceError::FixtureParse(_) => {
                Some("expected [[grants]] tables with id, donor, amount_cents, available_cents".to_string())
            }
            ComplianceError::BalanceExceedsTotal { .. } => {
                Some("available_cents must not exceed amount_cents".to_string())
            }
            _ => None,
        };
        // Io errors already name the path.
        let message = match &err {
            ComplianceError::Io(_) => err.to_string(),
            _ => format!("{}: {}", path.display(), err),
        };
        Self { code, message, hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// shared
// ============================================================================

/// The grant store: `file` if given, else the settings file, else built-in.
fn load_store(settings: &Settings, file: Option<PathBuf>) -> Result<GrantStore, CliError> {
    match file.or_else(|| settings.grants_file.clone()) {
        Some(path) => {
            log::debug!("loading grants from {}", path.display());
            GrantStore::load_file(&path).map_err(|e| CliError::grants(e, &path))
        }
        None => Ok(GrantStore::builtin()),
    }
}

fn write_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError::io(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn write_text(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes()).map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// ask
// ============================================================================

fn cmd_ask(
    question: &str,
    amount: Option<&str>,
    mode: Option<Mode>,
    seed: Option<u64>,
    json: bool,
) -> Result<(), CliError> {
    if question.trim().is_empty() {
        return Err(CliError::args("question is empty"));
    }

    let settings = Settings::load();
    let mode = mode.map(MatcherMode::from).unwrap_or(settings.matcher_mode);
    let store = load_store(&settings, None)?;
    let matcher = build_matcher(mode, store, seed.or(settings.matcher_seed));

    let inquiry = match amount {
        Some(raw) => {
            let cents = parse_amount_cents(raw).ok_or_else(|| {
                CliError::args(format!("cannot read amount {:?}", raw))
                    .with_hint("use a dollar figure like 15000, 15,000 or $15,000.50")
            })?;
            Inquiry::with_amount(question, cents)
        }
        None => Inquiry::parse(question),
    };

    let result = evaluate(matcher.as_ref(), &inquiry);
    if json {
        write_json(&result)
    } else {
        write_text(&render::decision(&result))
    }
}

// ============================================================================
// chat
// ============================================================================

fn cmd_chat(
    mode: Option<Mode>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    no_delay: bool,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let mode = mode.map(MatcherMode::from).unwrap_or(settings.matcher_mode);
    let seed = seed.or(settings.matcher_seed);
    let store = load_store(&settings, None)?;
    let matcher: Arc<dyn ComplianceMatcher> = Arc::from(build_matcher(mode, store, seed));

    let latency = if no_delay {
        Latency::none()
    } else if let Some(ms) = delay_ms {
        Latency::fixed(Duration::from_millis(ms))
    } else {
        let (lo, hi) = settings.delay_range();
        Latency::between(lo, hi)
    };

    let mut session = match seed {
        Some(seed) => ChatSession::seeded(matcher, latency, seed),
        None => ChatSession::new(matcher, latency),
    };

    let input_mode = if io::stdin().is_terminal() {
        repl::InputMode::Interactive
    } else {
        repl::InputMode::Batch
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    repl::run(&mut session, repl::stdin_lines(), input_mode, &mut handle)
        .map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// grants / dashboard
// ============================================================================

fn cmd_grants(file: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let settings = Settings::load();
    let store = load_store(&settings, file)?;
    if json {
        write_json(&store.grants())
    } else {
        write_text(&render::grants(store.grants(), &store.totals()))
    }
}

#[derive(serde::Serialize)]
struct Dashboard {
    partners: Vec<grantime_core::GrantPartner>,
    files: Vec<grantime_core::AgreementFile>,
}

fn cmd_dashboard(json: bool) -> Result<(), CliError> {
    let dashboard = Dashboard { partners: builtin_partners(), files: builtin_files() };
    if json {
        write_json(&dashboard)
    } else {
        write_text(&render::dashboard(&dashboard.partners, &dashboard.files))
    }
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(file: &Path) -> Result<(), CliError> {
    let store = GrantStore::load_file(file).map_err(|e| CliError::grants(e, file))?;
    let totals = store.totals();
    println!(
        "{}: {} grant(s), {} available of {}",
        file.display(),
        totals.grants,
        grantime_core::format_cad(totals.available_cents),
        grantime_core::format_cad(totals.amount_cents)
    );
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config_path() -> Result<(), CliError> {
    let path = Settings::config_path();
    let state = if path.exists() { "exists" } else { "not created" };
    println!("{} ({})", path.display(), state);
    Ok(())
}

fn cmd_config_init() -> Result<(), CliError> {
    let path = Settings::config_path();
    Settings::write_default_file(&path)
        .map_err(|e| CliError::settings(e).with_hint("edit the existing file, or remove it and re-run"))?;
    println!("wrote {}", path.display());
    Ok(())
}

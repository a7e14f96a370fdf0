use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;
use quiz_core::model::{Participant, QuestionBank, QuizSettings};
use services::{AppConfig, AppServices, Clock, QuizSession};
use tokio::runtime::Handle;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeconds { flag: &'static str, raw: String },
    InvalidBankPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeconds { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected whole seconds)")
            }
            ArgsError::InvalidBankPath { raw } => write!(f, "invalid --bank value: {raw:?}"),
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

fn parse_seconds(raw: String, flag: &'static str) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeconds { flag, raw })
}

fn parse_bank_path(raw: String) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidBankPath { raw });
    }
    Ok(PathBuf::from(raw.trim()))
}

struct DesktopApp {
    services: AppServices,
    runtime: Handle,
}

impl UiApp for DesktopApp {
    fn question_bank(&self) -> Arc<QuestionBank> {
        self.services.question_bank()
    }

    fn settings(&self) -> QuizSettings {
        self.services.settings()
    }

    fn new_session(&self, participant: Participant) -> QuizSession {
        self.services.new_session(participant)
    }

    fn runtime(&self) -> Handle {
        self.runtime.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path>] [--section-secs <n>] [--break-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in question bank, --section-secs 1800, --break-secs 30");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_PATH, QUIZ_SECTION_SECS, QUIZ_BREAK_SECS, RUST_LOG");
}

/// Defaults, then environment, then flags.
fn parse_config(
    env: impl Fn(&'static str) -> Option<String>,
    args: &mut impl Iterator<Item = String>,
) -> Result<AppConfig, ArgsError> {
    let mut config = AppConfig::default();

    if let Some(raw) = env("QUIZ_BANK_PATH") {
        config.bank_path = Some(parse_bank_path(raw)?);
    }
    if let Some(raw) = env("QUIZ_SECTION_SECS") {
        config.section_allowance_secs = parse_seconds(raw, "QUIZ_SECTION_SECS")?;
    }
    if let Some(raw) = env("QUIZ_BREAK_SECS") {
        config.break_secs = parse_seconds(raw, "QUIZ_BREAK_SECS")?;
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bank" => {
                config.bank_path = Some(parse_bank_path(require_value(args, "--bank")?)?);
            }
            "--section-secs" => {
                let value = require_value(args, "--section-secs")?;
                config.section_allowance_secs = parse_seconds(value, "--section-secs")?;
            }
            "--break-secs" => {
                let value = require_value(args, "--break-secs")?;
                config.break_secs = parse_seconds(value, "--break-secs")?;
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(config)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if argv.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let config = parse_config(|key| std::env::var(key).ok(), &mut argv.into_iter()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;

    let services = AppServices::from_config(&config, Clock::system())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        runtime: Handle::current(),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Aptitude Assessment")
            .with_always_on_top(false),
    );

    info!("launching quiz window");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &'static str| match key {
            "QUIZ_SECTION_SECS" => Some("600".to_string()),
            "QUIZ_BREAK_SECS" => Some("20".to_string()),
            _ => None,
        };
        let config = parse_config(env, &mut args(&["--section-secs", "90"])).unwrap();
        assert_eq!(config.section_allowance_secs, 90);
        assert_eq!(config.break_secs, 20);
        assert_eq!(config.bank_path, None);
    }

    #[test]
    fn defaults_without_env_or_flags() {
        let config = parse_config(|_| None, &mut args(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn bad_values_are_reported() {
        let err = parse_config(|_| None, &mut args(&["--break-secs", "soon"])).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSeconds { flag: "--break-secs", .. }));

        let err = parse_config(|_| None, &mut args(&["--bank"])).unwrap_err();
        assert!(matches!(err, ArgsError::MissingValue { flag: "--bank" }));

        let err = parse_config(|_| None, &mut args(&["--verbose"])).unwrap_err();
        assert!(matches!(err, ArgsError::UnknownArg(_)));
    }

    #[test]
    fn bank_path_from_env() {
        let env = |key: &'static str| (key == "QUIZ_BANK_PATH").then(|| "/tmp/bank.json".to_string());
        let config = parse_config(env, &mut args(&[])).unwrap();
        assert_eq!(config.bank_path, Some(PathBuf::from("/tmp/bank.json")));
    }
}

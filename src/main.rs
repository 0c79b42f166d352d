// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::Path;
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, LogLevel, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod extractors;
mod file_utils;
mod language_utils;
mod providers;
mod strings_file;
mod update_engine;

/// Configuration file looked up in the working directory by default
const DEFAULT_CONFIG_FILE: &str = "locsmith.json";

/// CLI wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Microsoft,
    #[value(name = "deepl")]
    DeepL,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Microsoft => TranslationProvider::Microsoft,
            CliTranslationProvider::DeepL => TranslationProvider::DeepL,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update strings files from localization calls in source code
    Code(CodeArgs),

    /// Update strings files from Base storyboard and XIB files
    Interfaces(InterfacesArgs),

    /// Machine-translate empty values from the source locale
    Translate(TranslateArgs),

    /// Harmonize locales with the source and clean strings files up
    Normalize(NormalizeArgs),

    /// Check strings files for duplicate keys and empty values
    Lint(LintArgs),

    /// Generate shell completions for locsmith
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CodeArgs {
    /// Project directory to scan
    #[arg(short, long)]
    path: Option<String>,

    /// Keep keys that are no longer referenced in code
    #[arg(short, long)]
    additive: bool,

    /// Use the key itself instead of an empty value for new entries
    #[arg(short = 'k', long)]
    default_to_keys: bool,

    /// Sort entries alphabetically by key
    #[arg(short, long)]
    sort_by_keys: bool,

    /// Replace existing comments with the extracted ones
    #[arg(long)]
    override_comments: bool,

    /// Replace existing values with the extracted ones
    #[arg(short, long)]
    override_values: bool,

    /// Keep whitespace surrounding values instead of trimming it
    #[arg(short, long)]
    unstripped: bool,

    /// Custom localization function to scan for
    #[arg(long, value_name = "NAME")]
    custom_function: Option<String>,

    /// Use extractLocStrings instead of genstrings
    #[arg(long)]
    use_extract_loc_strings: bool,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "FILE")]
    config_path: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct InterfacesArgs {
    /// Project directory to scan
    #[arg(short, long)]
    path: Option<String>,

    /// Use the key itself instead of an empty value for new entries
    #[arg(short, long)]
    default_to_base: bool,

    /// Never overwrite existing values with empty extracted ones
    #[arg(short, long)]
    ignore_empty_values: bool,

    /// Replace existing values with the extracted ones
    #[arg(short, long)]
    override_values: bool,

    /// Keep whitespace surrounding values instead of trimming it
    #[arg(short, long)]
    unstripped: bool,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "FILE")]
    config_path: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Project directory to scan
    #[arg(short, long)]
    path: Option<String>,

    /// Translation provider to use
    #[arg(long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// API key for the translation provider
    #[arg(short, long, value_name = "KEY")]
    api_key: Option<String>,

    /// Region of the translation resource (Microsoft only)
    #[arg(short, long)]
    region: Option<String>,

    /// API endpoint override
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Locale to translate from (e.g. 'en')
    #[arg(short, long)]
    source_locale: Option<String>,

    /// Translate non-empty values too, replacing them
    #[arg(short, long)]
    override_values: bool,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "FILE")]
    config_path: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Project directory to scan
    #[arg(short, long)]
    path: Option<String>,

    /// Locale to harmonize against (e.g. 'en')
    #[arg(short, long)]
    source_locale: Option<String>,

    /// Sort entries alphabetically by key
    #[arg(long)]
    sort_by_keys: bool,

    /// Keep whitespace surrounding values instead of trimming it
    #[arg(short, long)]
    unstripped: bool,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "FILE")]
    config_path: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct LintArgs {
    /// Project directory to scan
    #[arg(short, long)]
    path: Option<String>,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "FILE")]
    config_path: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// locsmith - A localization toolkit for Apple strings files
///
/// Keeps .strings files in sync with source code and interface files,
/// machine-translates missing values and normalizes files across locales.
#[derive(Parser, Debug)]
#[command(name = "locsmith")]
#[command(author = "locsmith contributors")]
#[command(version = "1.0.0")]
#[command(about = "Keep Apple .strings localization files up to date")]
#[command(long_about = "locsmith keeps Apple .strings files in sync with source code, interface
files and machine translation providers.

EXAMPLES:
    locsmith code -p ./Sources                  # Sync Localizable.strings with code
    locsmith code -p ./Sources -a -s            # Keep unreferenced keys, sort by key
    locsmith interfaces -p ./App                # Sync storyboard and XIB strings files
    locsmith translate -p ./App -a <api-key>    # Fill empty values via Microsoft Translator
    locsmith translate --provider deepl -a <api-key> -p ./App
    locsmith normalize -p ./App                 # Harmonize all locales with the source
    locsmith lint -p ./App                      # Report duplicate keys and empty values
    locsmith code -p ./App -l debug             # Run with debug logging
    locsmith completions bash > locsmith.bash   # Generate bash completions

CONFIGURATION:
    Configuration is read from locsmith.json in the working directory or from
    the user configuration directory (for example ~/.config/locsmith/config.json).
    Use --config to point at a specific file. Command line flags take precedence
    over configuration values.

SUPPORTED PROVIDERS:
    microsoft - Microsoft Translator v3 (requires an API key; a region is needed
                for regional resources)
    deepl     - DeepL v2 (requires an API key; set the endpoint to
                https://api-free.deepl.com for free-tier keys)

EXIT CODES:
    0 on success; 1 when a command fails or when lint finds issues.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color sequence for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after the configuration is loaded
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Code(args) => run_code(args).await,
        Commands::Interfaces(args) => run_interfaces(args).await,
        Commands::Translate(args) => run_translate(args).await,
        Commands::Normalize(args) => run_normalize(args),
        Commands::Lint(args) => run_lint(args),
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "locsmith", &mut std::io::stdout());
            Ok(())
        }
    }
}

async fn run_code(args: CodeArgs) -> Result<()> {
    let mut config = prepare_config(
        args.config_path.as_deref(),
        args.path.as_deref(),
        args.log_level.clone(),
    )?;

    if args.additive {
        config.code.additive = true;
    }
    if args.default_to_keys {
        config.code.default_to_keys = true;
    }
    if args.sort_by_keys {
        config.code.sort_by_keys = true;
    }
    if args.override_comments {
        config.code.override_comments = true;
    }
    if args.override_values {
        config.override_values = true;
    }
    if args.unstripped {
        config.code.unstripped = true;
    }
    if args.use_extract_loc_strings {
        config.code.use_extract_loc_strings = true;
    }
    if let Some(function) = &args.custom_function {
        config.code.custom_function = Some(function.clone());
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.run_code().await
}

async fn run_interfaces(args: InterfacesArgs) -> Result<()> {
    let mut config = prepare_config(
        args.config_path.as_deref(),
        args.path.as_deref(),
        args.log_level.clone(),
    )?;

    if args.default_to_base {
        config.interfaces.default_to_base = true;
    }
    if args.ignore_empty_values {
        config.interfaces.ignore_empty_values = true;
    }
    if args.override_values {
        config.override_values = true;
    }
    if args.unstripped {
        config.interfaces.unstripped = true;
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.run_interfaces().await
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut config = prepare_config(
        args.config_path.as_deref(),
        args.path.as_deref(),
        args.log_level.clone(),
    )?;

    if let Some(provider) = args.provider {
        config.translation.provider = provider.into();
    }
    if let Some(api_key) = &args.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(region) = &args.region {
        config.translation.region = region.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.translation.endpoint = endpoint.clone();
    }
    if let Some(source_locale) = &args.source_locale {
        config.source_locale = source_locale.clone();
    }
    if args.override_values {
        config.override_values = true;
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.run_translate().await
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let mut config = prepare_config(
        args.config_path.as_deref(),
        args.path.as_deref(),
        args.log_level.clone(),
    )?;

    if let Some(source_locale) = &args.source_locale {
        config.source_locale = source_locale.clone();
    }
    if args.sort_by_keys {
        config.normalize.sort_by_keys = true;
    }
    if args.unstripped {
        config.normalize.unstripped = true;
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.run_normalize()
}

fn run_lint(args: LintArgs) -> Result<()> {
    let config = prepare_config(
        args.config_path.as_deref(),
        args.path.as_deref(),
        args.log_level.clone(),
    )?;

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_lint()?;

    // Nonzero exit for CI; findings were already logged per file
    if summary.total_issues > 0 {
        return Err(anyhow!(
            "Found {} issue(s) in {} of {} strings files",
            summary.total_issues,
            summary.files_with_issues,
            summary.files_checked
        ));
    }
    Ok(())
}

/// Load the configuration and apply the overrides every command shares
fn prepare_config(
    config_path: Option<&str>,
    path_override: Option<&str>,
    cli_log_level: Option<CliLogLevel>,
) -> Result<Config> {
    // A command line log level applies before config loading so the
    // loading itself logs at the requested level
    if let Some(cmd_log_level) = &cli_log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = load_config(config_path)?;

    if let Some(path) = path_override {
        config.path = path.to_string();
    }
    if let Some(log_level) = cli_log_level {
        config.log_level = log_level.into();
    }

    log::set_max_level(level_filter(&config.log_level));

    Ok(config)
}

// Load configuration from an explicit path, the working directory or the
// user configuration directory, falling back to defaults
fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config_file(Path::new(path));
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return read_config_file(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("locsmith").join("config.json");
        if user.exists() {
            return read_config_file(&user);
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(Config::default())
}

fn read_config_file(path: &Path) -> Result<Config> {
    let file = File::open(path)
        .context(format!("Failed to open config file: {:?}", path))?;

    let reader = BufReader::new(file);
    let config: Config = serde_json::from_reader(reader)
        .context(format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

// @returns: log::LevelFilter for a configured log level
fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

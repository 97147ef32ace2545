//! optbench - console for a remote optimization-benchmark backend
//!
//! The `optbench` command lists the backend's catalogs, submits single- and
//! multi-algorithm test runs, controls the running calculation, and manages
//! reports and plugin libraries.
//!
//! ## Commands
//!
//! - `algorithms` / `functions`: show the catalogs
//! - `single` / `multi`: validate and submit a test run
//! - `status` / `stop` / `resume`: run control
//! - `reports`: list, download or delete result archives
//! - `plugins`: list, upload or delete plugin libraries

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use optbench_client::{
    BackendGateway, GatewayConfig, HttpGateway, MultiTestSession, PluginManager, ReportBrowser,
    RunControl, SingleTestSession, SubmitOutcome,
};
use optbench_core::{
    init_tracing, BoundSide, LogFormat, ParameterField, RunField, SessionSpan, ValidationReport,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(name = "optbench")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Optimization benchmark console", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Backend base URL
    #[arg(long, global = true, env = "OPTBENCH_BACKEND_URL")]
    backend: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, global = true)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the algorithm catalog with parameter bounds
    Algorithms,

    /// List the fitness-function catalog
    Functions,

    /// Test one algorithm against several fitness functions
    Single {
        /// Algorithm name
        #[arg(short, long)]
        algorithm: String,

        /// Domain bounds per dimension, as LOWER:UPPER (repeatable)
        #[arg(short, long = "domain", value_parser = parse_domain, allow_hyphen_values = true)]
        domains: Vec<(f64, f64)>,

        /// Parameter sweep per algorithm parameter, as LOWER:UPPER:STEP (repeatable)
        #[arg(short, long = "param", value_parser = parse_param, allow_hyphen_values = true)]
        params: Vec<(f64, f64, f64)>,

        /// Fitness function name (repeatable)
        #[arg(short, long = "function")]
        functions: Vec<String>,
    },

    /// Test several algorithms against one fitness function
    Multi {
        /// Fitness function name
        #[arg(short, long)]
        function: String,

        /// Domain bounds per dimension, as LOWER:UPPER (repeatable)
        #[arg(short, long = "domain", value_parser = parse_domain, allow_hyphen_values = true)]
        domains: Vec<(f64, f64)>,

        /// Algorithm with its run settings, as NAME=POPULATION:ITERATIONS (repeatable)
        #[arg(short, long = "run", value_parser = parse_run)]
        runs: Vec<(String, u32, u32)>,
    },

    /// Show the calculation status
    Status,

    /// Stop the running calculation
    Stop,

    /// Resume a stopped calculation
    Resume,

    /// Manage result reports
    Reports {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Manage plugin libraries
    Plugins {
        #[command(subcommand)]
        action: PluginAction,
    },
}

impl Commands {
    /// Session name attached to every log line of the command
    fn session(&self) -> &'static str {
        match self {
            Commands::Algorithms | Commands::Functions => "catalog",
            Commands::Single { .. } => "single_test",
            Commands::Multi { .. } => "multi_test",
            Commands::Status | Commands::Stop | Commands::Resume => "run_control",
            Commands::Reports { .. } => "reports",
            Commands::Plugins { .. } => "plugins",
        }
    }
}

#[derive(Subcommand)]
enum ReportAction {
    /// List available reports
    List,

    /// Download a report archive
    Download {
        /// Report name
        name: String,

        /// Directory to write `<name>.zip` into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Delete a report
    Delete {
        /// Report name
        name: String,
    },
}

#[derive(Subcommand)]
enum PluginAction {
    /// List loaded plugin libraries
    List,

    /// Upload a plugin library
    Upload {
        /// Path to the library file
        path: PathBuf,
    },

    /// Delete a plugin library
    Delete {
        /// Library file name
        file_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(LogFormat::from_json_flag(cli.json), level);

    let mut config = GatewayConfig::from_env();
    if let Some(url) = cli.backend {
        config = config.with_base_url(&url);
    }
    if cli.insecure {
        config = config.with_accept_invalid_certs(true);
    }
    let gateway: Arc<dyn BackendGateway> =
        Arc::new(HttpGateway::new(&config).context("Invalid backend configuration")?);

    let _span = SessionSpan::enter(cli.command.session());

    match cli.command {
        Commands::Algorithms => cmd_algorithms(gateway.as_ref()).await,
        Commands::Functions => cmd_functions(gateway.as_ref()).await,
        Commands::Single {
            algorithm,
            domains,
            params,
            functions,
        } => cmd_single(gateway, &algorithm, &domains, &params, &functions).await,
        Commands::Multi {
            function,
            domains,
            runs,
        } => cmd_multi(gateway, &function, &domains, &runs).await,
        Commands::Status => cmd_run_control(gateway, None).await,
        Commands::Stop => cmd_run_control(gateway, Some(false)).await,
        Commands::Resume => cmd_run_control(gateway, Some(true)).await,
        Commands::Reports { action } => match action {
            ReportAction::List => cmd_reports_list(gateway.as_ref()).await,
            ReportAction::Download { name, output } => {
                cmd_reports_download(gateway.as_ref(), &name, &output).await
            }
            ReportAction::Delete { name } => cmd_reports_delete(gateway, &name).await,
        },
        Commands::Plugins { action } => match action {
            PluginAction::List => cmd_plugins_list(gateway.as_ref()).await,
            PluginAction::Upload { path } => cmd_plugins_upload(gateway, &path).await,
            PluginAction::Delete { file_name } => cmd_plugins_delete(gateway, &file_name).await,
        },
    }
}

// ── Argument parsing ────────────────────────────────────────────────────

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{raw}'"))
}

fn parse_float(raw: &str, what: &str) -> Result<f64, String> {
    let value: f64 = parse_number(raw, what)?;
    if !value.is_finite() {
        return Err(format!("invalid {what}: '{raw}' is not a finite number"));
    }
    Ok(value)
}

/// `LOWER:UPPER`
fn parse_domain(s: &str) -> Result<(f64, f64), String> {
    let (lower, upper) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LOWER:UPPER, got '{s}'"))?;
    Ok((
        parse_float(lower, "lower bound")?,
        parse_float(upper, "upper bound")?,
    ))
}

/// `LOWER:UPPER:STEP`
fn parse_param(s: &str) -> Result<(f64, f64, f64), String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [lower, upper, step] = parts.as_slice() else {
        return Err(format!("expected LOWER:UPPER:STEP, got '{s}'"));
    };
    Ok((
        parse_float(lower, "lower bound")?,
        parse_float(upper, "upper bound")?,
        parse_float(step, "step")?,
    ))
}

/// `NAME=POPULATION:ITERATIONS`
fn parse_run(s: &str) -> Result<(String, u32, u32), String> {
    let (name, settings) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=POPULATION:ITERATIONS, got '{s}'"))?;
    let (population, iterations) = settings
        .split_once(':')
        .ok_or_else(|| format!("expected NAME=POPULATION:ITERATIONS, got '{s}'"))?;
    if name.trim().is_empty() {
        return Err(format!("missing algorithm name in '{s}'"));
    }
    Ok((
        name.trim().to_string(),
        parse_number(population, "population")?,
        parse_number(iterations, "iterations")?,
    ))
}

// ── Catalogs ────────────────────────────────────────────────────────────

/// List algorithms and their parameter bounds
async fn cmd_algorithms(gateway: &dyn BackendGateway) -> Result<()> {
    let algorithms = gateway
        .algorithms()
        .await
        .context("Failed to fetch algorithm catalog")?;

    if algorithms.is_empty() {
        println!("No algorithms available.");
        return Ok(());
    }

    for algorithm in algorithms {
        println!("{}", algorithm.name);
        for spec in algorithm.params_info {
            println!(
                "    {:<16} [{}, {}]  {}",
                spec.name, spec.lower_boundary, spec.upper_boundary, spec.description
            );
        }
    }

    Ok(())
}

/// List fitness functions
async fn cmd_functions(gateway: &dyn BackendGateway) -> Result<()> {
    let functions = gateway
        .fitness_functions()
        .await
        .context("Failed to fetch fitness-function catalog")?;

    if functions.is_empty() {
        println!("No fitness functions available.");
        return Ok(());
    }

    for function in functions {
        println!("{}", function.name);
    }

    Ok(())
}

// ── Submissions ─────────────────────────────────────────────────────────

fn print_field_errors(report: &ValidationReport) {
    for (field, message) in report.errors() {
        eprintln!("  {field}: {message}");
    }
}

fn finish_submission(outcome: SubmitOutcome, report: &ValidationReport) -> Result<()> {
    match outcome {
        SubmitOutcome::Sent => {
            println!("Submitted.");
            Ok(())
        }
        SubmitOutcome::Blocked => {
            eprintln!("Form is incomplete:");
            print_field_errors(report);
            bail!("{} field(s) failed validation", report.error_count())
        }
        SubmitOutcome::Failed => bail!("Backend did not accept the submission"),
    }
}

/// Submit a single-algorithm test
async fn cmd_single(
    gateway: Arc<dyn BackendGateway>,
    algorithm: &str,
    domains: &[(f64, f64)],
    params: &[(f64, f64, f64)],
    functions: &[String],
) -> Result<()> {
    let mut session = SingleTestSession::open(gateway).await;

    session.select_algorithm(Some(algorithm));
    if session.form().algorithm().is_none() {
        bail!("Unknown algorithm '{}'", algorithm);
    }

    session.set_dimension(domains.len());
    for (i, (lower, upper)) in domains.iter().enumerate() {
        session.set_domain_bound(i, BoundSide::Lower, *lower);
        session.set_domain_bound(i, BoundSide::Upper, *upper);
    }

    let expected = session.form().parameters().len();
    if params.len() > expected {
        bail!(
            "'{}' takes {} parameter(s), got {}",
            algorithm,
            expected,
            params.len()
        );
    }
    for (i, (lower, upper, step)) in params.iter().enumerate() {
        session.set_parameter(i, ParameterField::Lower, *lower);
        session.set_parameter(i, ParameterField::Upper, *upper);
        session.set_parameter(i, ParameterField::Step, *step);
    }

    for function in functions {
        session.set_function_checked(function, true);
    }

    let outcome = session.submit().await;
    finish_submission(outcome, session.report())
}

/// Submit a multi-algorithm test
async fn cmd_multi(
    gateway: Arc<dyn BackendGateway>,
    function: &str,
    domains: &[(f64, f64)],
    runs: &[(String, u32, u32)],
) -> Result<()> {
    let mut session = MultiTestSession::open(gateway).await;

    session.select_function(Some(function));
    if session.form().function().is_none() {
        bail!("Unknown fitness function '{}'", function);
    }

    for (name, _, _) in runs {
        session.set_algorithm_checked(name, true);
    }
    // run settings are indexed by position in the checked set
    for (name, population, iterations) in runs {
        let Some(index) = session.form().algorithms().iter().position(|a| a == name) else {
            bail!("Unknown algorithm '{}'", name);
        };
        session.set_run_config(index, RunField::Population, *population);
        session.set_run_config(index, RunField::Iterations, *iterations);
    }

    session.set_dimension(domains.len());
    for (i, (lower, upper)) in domains.iter().enumerate() {
        session.set_domain_bound(i, BoundSide::Lower, *lower);
        session.set_domain_bound(i, BoundSide::Upper, *upper);
    }

    let outcome = session.submit().await;
    finish_submission(outcome, session.report())
}

// ── Run control ─────────────────────────────────────────────────────────

/// Query, stop (`Some(false)`) or resume (`Some(true)`) the calculation
async fn cmd_run_control(gateway: Arc<dyn BackendGateway>, resume: Option<bool>) -> Result<()> {
    let mut control = match resume {
        None => RunControl::open(gateway).await,
        Some(_) => RunControl::new(gateway),
    };
    let status = match resume {
        None => control.status(),
        Some(false) => control.stop().await,
        Some(true) => control.resume().await,
    };

    if status.is_empty() {
        bail!("Backend did not report a status");
    }
    println!("{}", status);

    Ok(())
}

// ── Reports ─────────────────────────────────────────────────────────────

/// List reports
async fn cmd_reports_list(gateway: &dyn BackendGateway) -> Result<()> {
    let reports = gateway.reports().await.context("Failed to list reports")?;

    if reports.is_empty() {
        println!("No reports found.");
        return Ok(());
    }

    for name in reports {
        println!("{}", name);
    }

    Ok(())
}

/// Download a report archive into `dir`
async fn cmd_reports_download(gateway: &dyn BackendGateway, name: &str, dir: &Path) -> Result<()> {
    let archive = gateway
        .report_archive(name)
        .await
        .context(format!("Failed to download report '{}'", name))?;

    let path = dir.join(format!("{}.zip", name.replace(['/', '\\'], "_")));
    tokio::fs::write(&path, &archive)
        .await
        .context(format!("Failed to write {}", path.display()))?;

    println!("Saved {} ({} bytes)", path.display(), archive.len());

    Ok(())
}

/// Delete a report
async fn cmd_reports_delete(gateway: Arc<dyn BackendGateway>, name: &str) -> Result<()> {
    let mut browser = ReportBrowser::open(gateway).await;
    if !browser.delete(name).await {
        bail!("Failed to delete report '{}'", name);
    }

    println!("Deleted report '{}'", name);

    Ok(())
}

// ── Plugins ─────────────────────────────────────────────────────────────

/// List plugin libraries with the algorithms and functions they provide
async fn cmd_plugins_list(gateway: &dyn BackendGateway) -> Result<()> {
    let plugins = gateway.plugins().await.context("Failed to list plugins")?;

    if plugins.is_empty() {
        println!("No plugins loaded.");
        return Ok(());
    }

    for plugin in plugins {
        println!("{}", plugin.file_name);
        for algorithm in plugin.algorithm_list {
            println!("    algorithm {}", algorithm.name);
        }
        for function in plugin.function_list {
            println!("    function  {}", function.name);
        }
    }

    Ok(())
}

/// Upload a plugin library
async fn cmd_plugins_upload(gateway: Arc<dyn BackendGateway>, path: &Path) -> Result<()> {
    let mut manager = PluginManager::open(gateway).await;
    if !manager.upload(path).await {
        bail!("Failed to upload {}", path.display());
    }

    println!(
        "Uploaded {} ({} plugin(s) loaded)",
        path.display(),
        manager.plugins().len()
    );

    Ok(())
}

/// Delete a plugin library
async fn cmd_plugins_delete(gateway: Arc<dyn BackendGateway>, file_name: &str) -> Result<()> {
    let mut manager = PluginManager::open(gateway).await;
    if !manager.delete(file_name).await {
        bail!("Failed to delete plugin '{}'", file_name);
    }

    println!("Deleted plugin '{}'", file_name);

    Ok(())
}

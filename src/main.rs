use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use story_spoiler::config::SuiteConfig;
use story_spoiler::logging::init_logging;
use story_spoiler::report::SuiteReport;
use story_spoiler::scenario::{ScenarioGraph, Suite};
use story_spoiler::session::TestSession;
use story_spoiler::SuiteError;

#[derive(Parser)]
#[command(name = "story-spoiler")]
#[command(about = "Ordered end-to-end checks against the Story Spoiler API", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate once and run the scenarios in order
    Run {
        /// Which scenario chain to run
        #[arg(long, value_enum, default_value_t = SuiteArg::Standard)]
        suite: SuiteArg,

        /// Run only these scenario ids (plus what they depend on)
        #[arg(long = "only", value_name = "ID")]
        only: Vec<String>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override the login user name
        #[arg(long)]
        user: Option<String>,
    },

    /// List scenarios in execution order
    Scenarios {
        #[arg(long, value_enum, default_value_t = SuiteArg::All)]
        suite: SuiteArg,
    },

    /// Show the resolved configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum SuiteArg {
    Standard,
    Lifecycle,
    All,
}

impl SuiteArg {
    fn suites(self) -> Vec<Suite> {
        match self {
            SuiteArg::Standard => vec![Suite::Standard],
            SuiteArg::Lifecycle => vec![Suite::Lifecycle],
            SuiteArg::All => Suite::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

const EXIT_SCENARIO_FAILURE: u8 = 1;
const EXIT_SETUP_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            suite,
            only,
            format,
            base_url,
            user,
        } => run(cli.config, suite, only, format, base_url, user),
        Commands::Scenarios { suite } => scenarios(suite).map(|()| ExitCode::SUCCESS),
        Commands::Config => show_config(cli.config).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|err| {
        eprintln!("{} {err:#}", "error:".red().bold());
        ExitCode::from(EXIT_SETUP_FAILURE)
    })
}

fn run(
    config_path: Option<PathBuf>,
    suite: SuiteArg,
    only: Vec<String>,
    format: OutputFormat,
    base_url: Option<String>,
    user: Option<String>,
) -> Result<ExitCode> {
    let suites = suite.suites();
    for id in &only {
        if !suites.iter().any(|s| s.contains(id)) {
            bail!("Unknown scenario '{id}' for the selected suite");
        }
    }

    let config = SuiteConfig::load(config_path.as_deref())
        .and_then(|c| c.with_overrides(base_url, user))
        .context("Failed to resolve configuration")?;

    let session = TestSession::open(config).map_err(|err: SuiteError| {
        let context = if err.is_authentication_failure() {
            "Authentication failed; no scenarios were run"
        } else {
            "Failed to open test session"
        };
        anyhow::Error::new(err).context(context)
    })?;

    let mut reports: Vec<SuiteReport> = Vec::new();
    for suite in suites {
        let selected: Vec<String> = only
            .iter()
            .filter(|id| suite.contains(id))
            .cloned()
            .collect();
        if !only.is_empty() && selected.is_empty() {
            continue;
        }
        reports.push(
            session
                .run_suite(suite, &selected)
                .with_context(|| format!("Failed to run {suite} suite"))?,
        );
    }
    session.close();

    match format {
        OutputFormat::Text => {
            for report in &reports {
                print!("{}", report.render_text());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).context("Failed to encode report")?;
            println!("{json}");
        }
    }

    if reports.iter().all(SuiteReport::is_success) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_SCENARIO_FAILURE))
    }
}

fn scenarios(suite: SuiteArg) -> Result<()> {
    for suite in suite.suites() {
        let defs = suite.scenarios();
        let graph = ScenarioGraph::build(&defs)?;
        println!("{}", suite.to_string().bold());
        for (n, def) in graph.execution_order().into_iter().enumerate() {
            let deps = if def.depends_on.is_empty() {
                String::new()
            } else {
                format!(" (after {})", def.depends_on.join(", "))
            };
            println!(
                "  {:>2}. {} {}{}",
                n + 1,
                def.id.cyan(),
                def.title,
                deps.dimmed()
            );
        }
    }
    Ok(())
}

fn show_config(config_path: Option<PathBuf>) -> Result<()> {
    let config =
        SuiteConfig::load(config_path.as_deref()).context("Failed to resolve configuration")?;
    println!("{} {}", "base_url:".bold(), config.base_url);
    println!("{} {}", "user_name:".bold(), config.user_name);
    println!("{} ***", "password:".bold());
    match config.request_timeout_secs {
        Some(secs) => println!("{} {secs}s", "request_timeout:".bold()),
        None => println!("{} client default", "request_timeout:".bold()),
    }
    Ok(())
}

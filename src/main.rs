mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::cmd::changes::{self, ChangesCommandArgs};
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::tool;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::jira::JiraClient;
use crate::services::IssueTrackerService;
use crate::workflow::production_changes::DEFAULT_BRANCH;

#[derive(Parser)]
#[command(
    name = "prodlog",
    author,
    version,
    about = "Daily production-change reports grouped by ticket"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the changes pushed to a branch on one day.
    Changes(ChangesArgs),
    /// Invoke a tool by name with JSON arguments and print the JSON result.
    Call(CallArgs),
    /// List the available tools and their input schemas.
    Tools,
    /// Inspect CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ChangesArgs {
    /// Repository in owner/repo format.
    repository: String,
    /// Production branch to inspect.
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    branch: String,
    /// Day to report on (YYYY-MM-DD, UTC). Defaults to today.
    #[arg(short, long)]
    date: Option<String>,
}

#[derive(Args)]
struct CallArgs {
    /// Tool name, e.g. get_production_changes.
    name: String,
    /// Tool arguments as a JSON object.
    #[arg(short, long, default_value = "{}")]
    arguments: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` when a tool call produced an error result.
async fn run() -> AppResult<bool> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command, &config)?;
            Ok(true)
        }
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&tool::tool_catalog())?);
            Ok(true)
        }
        Commands::Changes(args) => {
            let context = build_context(config);
            let report = changes::run(
                &context,
                ChangesCommandArgs {
                    repository: args.repository,
                    branch: args.branch,
                    date: args.date,
                },
            )
            .await?;
            println!("{report}");
            Ok(true)
        }
        Commands::Call(args) => {
            let context = build_context(config);
            let result = tool::call_tool(&context, &args.name, &args.arguments).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(!result.is_error())
        }
    }
}

fn build_context(config: AppConfig) -> AppContext {
    if config.jira.is_none() {
        tracing::info!("Jira credentials not configured; issue enrichment disabled");
    }

    let version_control = Arc::new(GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
    ));
    let issue_tracker = config
        .jira
        .clone()
        .map(|credentials| Arc::new(JiraClient::new(credentials)) as Arc<dyn IssueTrackerService>);

    AppContext::new(config, version_control, issue_tracker)
}

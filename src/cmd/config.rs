use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration resolved from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand, config: &AppConfig) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            for line in describe(config) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn describe(config: &AppConfig) -> Vec<String> {
    let jira = config.jira.as_ref();
    vec![
        format!("GitHub API URL: {}", config.github_api_url),
        format!("GitHub token: {}", mask_secret(config.github_token.as_deref())),
        format!(
            "Jira base URL: {}",
            display_value(jira.map(|jira| jira.base_url.as_str()))
        ),
        format!(
            "Jira username: {}",
            display_value(jira.map(|jira| jira.username.as_str()))
        ),
        format!(
            "Jira API token: {}",
            mask_secret(jira.map(|jira| jira.token.as_str()))
        ),
        format!(
            "Issue enrichment: {}",
            if jira.is_some() { "enabled" } else { "disabled" }
        ),
    ]
}

fn display_value(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: Option<&str>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

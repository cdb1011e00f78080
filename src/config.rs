use std::env;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub jira: Option<JiraCredentials>,
}

/// Credentials for the issue tracker. Only built when every field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    pub base_url: String,
    pub username: String,
    pub token: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let jira = match (read("JIRA_URL"), read("JIRA_USERNAME"), read("JIRA_API_TOKEN")) {
            (Some(base_url), Some(username), Some(token)) => Some(JiraCredentials {
                base_url: normalize_base_url(&base_url),
                username,
                token,
            }),
            _ => None,
        };

        Self {
            github_api_url: read("GITHUB_API_URL")
                .map(|url| normalize_base_url(&url))
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_token: read("GITHUB_TOKEN"),
            jira,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

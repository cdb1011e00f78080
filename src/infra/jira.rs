use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;
use tracing::debug;

use crate::config::JiraCredentials;
use crate::domain::ticket::{TicketKey, TrackedIssue};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    credentials: JiraCredentials,
}

impl JiraClient {
    pub fn new(credentials: JiraCredentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
        }
    }

    fn auth_header(username: &str, token: &str) -> String {
        let credentials = format!("{username}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn issue_endpoint(base_url: &str, key: &str) -> String {
        format!("{}/rest/api/2/issue/{key}", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn find_issue(&self, key: &TicketKey) -> AppResult<TrackedIssue> {
        let JiraCredentials {
            base_url,
            username,
            token,
        } = &self.credentials;
        let endpoint = Self::issue_endpoint(base_url, key.as_str());
        debug!(ticket = %key, %endpoint, "fetching Jira issue");

        let response = self
            .http
            .get(&endpoint)
            .header(AUTHORIZATION, Self::auth_header(username, token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status} for {key}: {body}"
            )));
        }

        let payload: JiraIssueResponse = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira response for {key}: {err}"))
        })?;

        Ok(payload.into_issue())
    }
}

#[derive(Deserialize)]
struct JiraIssueResponse {
    key: String,
    fields: JiraIssueFields,
}

impl JiraIssueResponse {
    fn into_issue(self) -> TrackedIssue {
        let JiraIssueFields {
            summary,
            status,
            assignee,
            description,
        } = self.fields;
        TrackedIssue {
            key: self.key,
            summary: summary.unwrap_or_default(),
            status: status.map(|status| status.name).unwrap_or_default(),
            assignee: assignee.map(|user| user.display_name),
            description,
        }
    }
}

#[derive(Deserialize)]
struct JiraIssueFields {
    summary: Option<String>,
    status: Option<JiraStatus>,
    assignee: Option<JiraUser>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct JiraStatus {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraUser {
    display_name: String,
}

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::change::FileDiff;
use crate::domain::commit::{CommitHeader, CommitStats};
use crate::domain::repository::{DayWindow, RepositoryRef};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

const PAGE_SIZE: usize = 100;

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: String, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, endpoint: &str) -> RequestBuilder {
        let builder = self
            .http
            .get(format!("{}{endpoint}", self.api_url))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("prodlog/", env!("CARGO_PKG_VERSION")));
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::VersionControl(format!(
                "GitHub responded with {status}: {body}"
            )));
        }

        response.json().await.map_err(|err| {
            AppError::VersionControl(format!("failed to parse GitHub response: {err}"))
        })
    }
}

#[async_trait]
impl VersionControlService for GitHubClient {
    async fn verify_repository(&self, repo: &RepositoryRef) -> AppResult<()> {
        let endpoint = format!("/repos/{}/{}", repo.owner, repo.name);
        let found: RepositoryResponse = self.fetch(self.request(&endpoint)).await?;
        debug!(repository = %found.full_name, "repository resolved");
        Ok(())
    }

    async fn list_commits(
        &self,
        repo: &RepositoryRef,
        branch: &str,
        window: &DayWindow,
    ) -> AppResult<Vec<CommitHeader>> {
        let endpoint = format!("/repos/{}/{}/commits", repo.owner, repo.name);
        let since = window.start.to_rfc3339_opts(SecondsFormat::Secs, true);
        let until = window
            .inclusive_end()
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut headers = Vec::new();
        let mut page = 1usize;
        loop {
            let request = self.request(&endpoint).query(&[
                ("sha", branch.to_string()),
                ("since", since.clone()),
                ("until", until.clone()),
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ]);
            let batch: Vec<ListedCommit> = self.fetch(request).await?;
            let fetched = batch.len();
            debug!(%repo, branch, page, fetched, "listed commits");
            headers.extend(batch.into_iter().map(ListedCommit::into_header));
            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(headers)
    }

    async fn commit_details(&self, repo: &RepositoryRef, sha: &str) -> AppResult<CommitStats> {
        let endpoint = format!("/repos/{}/{}/commits/{sha}", repo.owner, repo.name);
        let details: CommitDetailsResponse = self.fetch(self.request(&endpoint)).await?;
        Ok(details.into_stats())
    }
}

#[derive(Deserialize)]
struct RepositoryResponse {
    full_name: String,
}

#[derive(Deserialize)]
struct ListedCommit {
    sha: String,
    commit: ListedCommitBody,
}

#[derive(Deserialize)]
struct ListedCommitBody {
    message: String,
    author: Option<CommitAuthor>,
}

#[derive(Deserialize)]
struct CommitAuthor {
    name: Option<String>,
}

impl ListedCommit {
    fn into_header(self) -> CommitHeader {
        let author = self
            .commit
            .author
            .and_then(|author| author.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        CommitHeader {
            sha: self.sha,
            message: self.commit.message,
            author,
        }
    }
}

#[derive(Deserialize)]
struct CommitDetailsResponse {
    stats: Option<CommitStatsResponse>,
    #[serde(default)]
    files: Vec<CommitFileResponse>,
}

#[derive(Deserialize)]
struct CommitStatsResponse {
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
}

#[derive(Deserialize)]
struct CommitFileResponse {
    filename: String,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    patch: Option<String>,
}

impl CommitDetailsResponse {
    fn into_stats(self) -> CommitStats {
        let (additions, deletions) = self
            .stats
            .map(|stats| (stats.additions, stats.deletions))
            .unwrap_or_default();
        CommitStats {
            additions,
            deletions,
            files: self
                .files
                .into_iter()
                .map(|file| FileDiff {
                    filename: file.filename,
                    additions: file.additions,
                    deletions: file.deletions,
                    patch: file.patch,
                })
                .collect(),
        }
    }
}

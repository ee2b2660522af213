use async_trait::async_trait;
use octocrab::{
    models,
    params::{pulls::Sort, Direction, State},
    service::middleware::retry::RetryConfig,
    Octocrab,
};
use serde::Serialize;
use shared::{GithubHandle, PullRequestRecord};
use tracing::instrument;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const PER_PAGE: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("GitHub API error: {message}")]
    Remote { status: u16, message: String },
    #[error("Unexpected GitHub response: {0}")]
    Payload(String),
    #[error("GitHub request failed: {0}")]
    Request(octocrab::Error),
}

impl From<octocrab::Error> for GithubError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code;
                // GitHub's own message, or the reason phrase when it sent none
                let message = Some(source.message)
                    .filter(|message| !message.is_empty())
                    .or_else(|| status.canonical_reason().map(ToString::to_string))
                    .unwrap_or_else(|| status.as_str().to_string());
                Self::Remote {
                    status: status.as_u16(),
                    message,
                }
            }
            octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
                Self::Payload(error.to_string())
            }
            error => Self::Request(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
    pub name: String,
    pub owner: GithubHandle,
}

impl From<models::Repository> for Repository {
    fn from(repo: models::Repository) -> Self {
        let owner = repo.owner.map(|owner| owner.login).unwrap_or_default();
        Self {
            full_name: repo
                .full_name
                .unwrap_or_else(|| format!("{owner}/{}", repo.name)),
            name: repo.name,
            owner,
        }
    }
}

/// Single pages of the GitHub listings the leaderboard needs.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// `page` is 1-based. Pull requests come newest first.
    async fn pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<PullRequestRecord>, GithubError>;

    /// Repositories of the authenticated user, most recently updated first.
    async fn repositories_page(&self, page: u32) -> Result<Vec<Repository>, GithubError>;
}

#[derive(Serialize)]
struct RepositoriesQuery {
    per_page: usize,
    page: u32,
    sort: &'static str,
    direction: &'static str,
}

/// REST client acting on behalf of one caller.
pub struct GithubClient {
    octocrab: Octocrab,
}

impl GithubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self, GithubError> {
        // A failed page fails the whole fetch, so no request is retried
        let octocrab = Octocrab::builder()
            .base_uri(api_url)?
            .personal_token(token.to_string())
            .add_retry_config(RetryConfig::None)
            .build()?;
        Ok(Self { octocrab })
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    #[instrument(skip(self))]
    async fn pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<PullRequestRecord>, GithubError> {
        let response = self
            .octocrab
            .pulls(owner, repo)
            .list()
            .state(State::All)
            .sort(Sort::Created)
            .direction(Direction::Descending)
            .per_page(PER_PAGE as u8)
            .page(page)
            .send()
            .await?;

        response
            .items
            .into_iter()
            .map(|pr| {
                PullRequestRecord::try_from(pr)
                    .map_err(|error| GithubError::Payload(error.to_string()))
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn repositories_page(&self, page: u32) -> Result<Vec<Repository>, GithubError> {
        let query = RepositoriesQuery {
            per_page: PER_PAGE,
            page,
            sort: "updated",
            direction: "desc",
        };
        let repos: Vec<models::Repository> = self.octocrab.get("/user/repos", Some(&query)).await?;
        Ok(repos.into_iter().map(Into::into).collect())
    }
}

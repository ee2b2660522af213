use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GithubHandle;

pub type PRNumber = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PRState {
    Open,
    Closed,
}

/// A pull request as reported by the forge.
///
/// Pages are requested newest-first, so `created_at` is expected to be
/// non-increasing across a fetched sequence. Nothing here enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestRecord {
    pub number: PRNumber,
    pub title: String,
    pub state: PRState,
    pub author_login: Option<GithubHandle>,
    pub author_avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

impl PullRequestRecord {
    /// Author login, treating an empty login the same as a missing one.
    pub fn author(&self) -> Option<&str> {
        self.author_login.as_deref().filter(|login| !login.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestSummary {
    pub number: PRNumber,
    pub title: String,
    pub state: PRState,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub url: String,
}

impl From<&PullRequestRecord> for PullRequestSummary {
    fn from(pr: &PullRequestRecord) -> Self {
        Self {
            number: pr.number,
            title: pr.title.clone(),
            state: pr.state,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
            url: pr.html_url.clone(),
        }
    }
}

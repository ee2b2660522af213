use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Leaderboard, PRState, PullRequestSummary, RankedContributor};
use utoipa::ToSchema;

use crate::github::Repository;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PullRequestResponse {
    pub number: u64,
    pub title: String,
    #[schema(value_type = String, example = "open")]
    pub state: PRState,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub url: String,
}

impl From<PullRequestSummary> for PullRequestResponse {
    fn from(pr: PullRequestSummary) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            state: pr.state,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
            url: pr.url,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ContributorResponse {
    pub username: String,
    pub count: u32,
    pub prs: Vec<PullRequestResponse>,
    /// Empty when GitHub reported no avatar.
    pub avatar: String,
    pub score: u32,
    pub rank: u32,
}

impl From<RankedContributor> for ContributorResponse {
    fn from(ranked: RankedContributor) -> Self {
        let contributor = ranked.contributor;
        Self {
            username: contributor.username,
            count: contributor.pull_request_count,
            prs: contributor
                .pull_requests
                .into_iter()
                .map(Into::into)
                .collect(),
            avatar: contributor.avatar_url,
            score: ranked.score,
            rank: ranked.rank,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    /// Rank order. Clients should not re-sort.
    pub leaderboard: Vec<ContributorResponse>,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    #[serde(rename = "totalMembers")]
    pub total_members: u64,
    pub since: Option<String>,
}

impl LeaderboardResponse {
    pub fn new(leaderboard: Leaderboard, since: Option<String>) -> Self {
        Self {
            total_prs: leaderboard.total_count as u64,
            total_members: leaderboard.total_members() as u64,
            leaderboard: leaderboard
                .contributors
                .into_iter()
                .map(Into::into)
                .collect(),
            since,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RepositoryResponse {
    pub full_name: String,
    pub name: String,
    pub owner: String,
}

impl From<Repository> for RepositoryResponse {
    fn from(repo: Repository) -> Self {
        Self {
            full_name: repo.full_name,
            name: repo.name,
            owner: repo.owner,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RepositoriesResponse {
    pub repositories: Vec<RepositoryResponse>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

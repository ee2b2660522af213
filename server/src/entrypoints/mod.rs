use std::future::Future;

use rocket::fairing::AdHoc;
use utoipa::OpenApi;

use crate::{
    config::Env,
    error::{ApiError, ErrorResponse},
    github::GithubError,
    types::{
        ContributorResponse, HealthResponse, LeaderboardResponse, PullRequestResponse,
        RepositoriesResponse, RepositoryResponse,
    },
};

pub mod health;
pub mod leaderboards;
pub mod repositories;

#[derive(OpenApi)]
#[openapi(
    info(title = "PR Leaderboard API"),
    paths(
        leaderboards::get_leaderboard,
        repositories::get_repositories,
        health::get_health
    ),
    components(schemas(
        LeaderboardResponse,
        ContributorResponse,
        PullRequestResponse,
        RepositoriesResponse,
        RepositoryResponse,
        HealthResponse,
        ErrorResponse
    ))
)]
pub struct ApiDoc;

/// Runs a GitHub fetch under the configured deadline, if any.
pub(crate) async fn with_deadline<T>(
    env: &Env,
    fetch: impl Future<Output = Result<T, GithubError>>,
) -> Result<T, ApiError> {
    match env.fetch_timeout() {
        Some(timeout) => rocket::tokio::time::timeout(timeout, fetch)
            .await
            .map_err(|_| ApiError::Timeout(timeout.as_secs()))?
            .map_err(Into::into),
        None => Ok(fetch.await?),
    }
}

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket
            .attach(leaderboards::stage())
            .attach(repositories::stage())
            .attach(health::stage())
    })
}

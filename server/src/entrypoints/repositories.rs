use rocket::{serde::json::Json, State};
use tracing::instrument;

use crate::{
    config::Env,
    error::{ApiError, ErrorResponse},
    fetcher::fetch_repositories,
    github::GithubClient,
    session::Session,
    types::RepositoriesResponse,
};

use super::with_deadline;

#[utoipa::path(
    context_path = "/api",
    responses(
        (status = 200, description = "Repositories of the authenticated user", body = RepositoriesResponse),
        (status = 401, description = "No GitHub credential", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
#[get("/repositories")]
#[instrument(skip(session, env), fields(user = session.as_ref().ok().and_then(Session::username)))]
async fn get_repositories(
    session: Result<Session, ApiError>,
    env: &State<Env>,
) -> Result<Json<RepositoriesResponse>, ApiError> {
    let session = session?;
    let github = GithubClient::new(&env.github_api_url, session.access_token())?;
    let repositories = with_deadline(env, fetch_repositories(&github)).await?;

    Ok(Json(RepositoriesResponse {
        repositories: repositories.into_iter().map(Into::into).collect(),
    }))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing repository entrypoints", |rocket| async {
        rocket.mount("/api", rocket::routes![get_repositories])
    })
}

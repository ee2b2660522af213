use rocket::{serde::json::Json, State};
use shared::Leaderboard;
use tracing::{info, instrument};

use crate::{
    config::Env,
    error::{ApiError, ErrorResponse},
    fetcher::fetch_pull_requests,
    github::GithubClient,
    session::Session,
    since::parse_since,
    types::LeaderboardResponse,
};

use super::with_deadline;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Owner and repository names end up as URL path segments.
fn is_path_segment(value: &str) -> bool {
    value != "."
        && value != ".."
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[utoipa::path(
    context_path = "/api",
    params(
        ("owner" = String, Query, description = "Repository owner"),
        ("repo" = String, Query, description = "Repository name"),
        ("since" = Option<String>, Query, description = "Only count pull requests created at or after this ISO-8601 timestamp. A `+` offset must be percent-encoded as `%2B`, an unencoded one arrives as a space and is read back as `+`")
    ),
    responses(
        (status = 200, description = "Contributors ranked by pull request count", body = LeaderboardResponse),
        (status = 400, description = "Missing or invalid owner/repo, or unparsable since", body = ErrorResponse),
        (status = 401, description = "No GitHub credential", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse),
        (status = 504, description = "GitHub did not answer in time", body = ErrorResponse)
    )
)]
#[get("/prs?<owner>&<repo>&<since>")]
#[instrument(skip(session, env), fields(user = session.as_ref().ok().and_then(Session::username)))]
async fn get_leaderboard(
    session: Result<Session, ApiError>,
    env: &State<Env>,
    owner: Option<&str>,
    repo: Option<&str>,
    since: Option<&str>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let session = session?;
    let (Some(owner), Some(repo)) = (non_empty(owner), non_empty(repo)) else {
        return Err(ApiError::InvalidRequest(
            "Missing owner or repo parameters".to_string(),
        ));
    };
    if !is_path_segment(owner) || !is_path_segment(repo) {
        return Err(ApiError::InvalidRequest(format!(
            "Invalid repository: {owner}/{repo}"
        )));
    }
    let since_text = non_empty(since);
    let since = since_text
        .map(|text| {
            parse_since(text)
                .ok_or_else(|| ApiError::InvalidRequest(format!("Invalid since timestamp: {text}")))
        })
        .transpose()?;

    let github = GithubClient::new(&env.github_api_url, session.access_token())?;
    let records = with_deadline(env, fetch_pull_requests(&github, owner, repo, since)).await?;

    let leaderboard = Leaderboard::compute(&records);
    info!(
        "Leaderboard for {owner}/{repo}: {} pull requests from {} contributors",
        leaderboard.total_count,
        leaderboard.total_members()
    );

    Ok(Json(LeaderboardResponse::new(
        leaderboard,
        since_text.map(ToString::to_string),
    )))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing leaderboard entrypoints", |rocket| async {
        rocket.mount("/api", rocket::routes![get_leaderboard])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments() {
        for name in ["octo", "hello-world", "my_repo", ".github", "rust-lang.org"] {
            assert!(is_path_segment(name), "{name}");
        }
        for name in ["x/pulls?a=", "a#b", "..", ".", "a b", "a%2Fb"] {
            assert!(!is_path_segment(name), "{name}");
        }
    }
}

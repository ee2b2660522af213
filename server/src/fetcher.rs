use chrono::{DateTime, Utc};
use shared::{PRNumber, PullRequestRecord};
use tracing::{debug, info, instrument, warn};

use crate::github::{GithubApi, GithubError, Repository, PER_PAGE};

/// Fetches every pull request of `owner/repo`, or only those created at or
/// after `since`.
///
/// Pages are requested one after another, newest first. Without `since`
/// the loop ends on an empty or short page. With `since` it also ends after
/// the first page holding an older pull request, which assumes GitHub
/// returns pull requests sorted by creation time. Any failed page request
/// fails the whole fetch.
#[instrument(skip(github))]
pub async fn fetch_pull_requests(
    github: &impl GithubApi,
    owner: &str,
    repo: &str,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<PullRequestRecord>, GithubError> {
    let mut result = Vec::new();
    let mut order = SortOrder::default();
    let mut page = 1;

    loop {
        let records = github.pull_requests_page(owner, repo, page).await?;
        let fetched = records.len();
        debug!("Fetched page {page} with {fetched} pull requests");
        if fetched == 0 {
            break;
        }

        if let Some(number) = order.first_out_of_order(&records) {
            warn!(
                "Pull request #{number} of {owner}/{repo} breaks the creation-time order, \
                 the result may be incomplete"
            );
        }

        let kept = match since {
            Some(since) => {
                let before = result.len();
                result.extend(records.into_iter().filter(|pr| pr.created_at >= since));
                result.len() - before
            }
            None => {
                result.extend(records);
                fetched
            }
        };

        if kept < fetched {
            debug!("Page {page} reached pull requests older than {since:?}");
            break;
        }
        if fetched < PER_PAGE {
            break;
        }
        page += 1;
    }

    info!(
        "Fetched {} pull requests for {owner}/{repo} in {page} pages",
        result.len()
    );
    Ok(result)
}

/// Fetches every repository of the authenticated user.
#[instrument(skip(github))]
pub async fn fetch_repositories(github: &impl GithubApi) -> Result<Vec<Repository>, GithubError> {
    let mut result = Vec::new();
    let mut page = 1;

    loop {
        let repos = github.repositories_page(page).await?;
        let fetched = repos.len();
        debug!("Fetched page {page} with {fetched} repositories");
        result.extend(repos);

        if fetched < PER_PAGE {
            break;
        }
        page += 1;
    }

    info!("Fetched {} repositories in {page} pages", result.len());
    Ok(result)
}

/// Tracks the creation time of the last record seen across pages.
#[derive(Default)]
struct SortOrder {
    last: Option<DateTime<Utc>>,
    reported: bool,
}

impl SortOrder {
    /// Returns the first record newer than its predecessor. Reports once.
    fn first_out_of_order(&mut self, records: &[PullRequestRecord]) -> Option<PRNumber> {
        let mut found = None;
        for pr in records {
            if found.is_none() && self.last.is_some_and(|last| pr.created_at > last) {
                found = Some(pr.number);
            }
            self.last = Some(pr.created_at);
        }

        if self.reported {
            return None;
        }
        self.reported = found.is_some();
        found
    }
}

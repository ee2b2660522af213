use octocrab::models::{pulls::PullRequest, IssueState};

use crate::{PRState, PullRequestRecord};

impl TryFrom<PullRequest> for PullRequestRecord {
    type Error = anyhow::Error;

    fn try_from(pr: PullRequest) -> anyhow::Result<Self> {
        let Some(created_at) = pr.created_at else {
            return Err(anyhow::anyhow!(
                "Pull request #{} has no creation time",
                pr.number
            ));
        };

        let (author_login, author_avatar_url) = match pr.user {
            Some(user) => (Some(user.login), Some(user.avatar_url.to_string())),
            None => (None, None),
        };
        let state = match pr.state {
            Some(IssueState::Closed) => PRState::Closed,
            _ => PRState::Open,
        };

        Ok(Self {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            state,
            author_login,
            author_avatar_url,
            created_at,
            merged_at: pr.merged_at,
            html_url: pr.html_url.map(|url| url.to_string()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use super::*;

    fn user(login: &str) -> Value {
        let api = format!("https://api.github.com/users/{login}");
        json!({
            "login": login,
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": format!("https://avatars.githubusercontent.com/{login}"),
            "gravatar_id": "",
            "url": api,
            "html_url": format!("https://github.com/{login}"),
            "followers_url": format!("{api}/followers"),
            "following_url": format!("{api}/following"),
            "gists_url": format!("{api}/gists"),
            "starred_url": format!("{api}/starred"),
            "subscriptions_url": format!("{api}/subscriptions"),
            "organizations_url": format!("{api}/orgs"),
            "repos_url": format!("{api}/repos"),
            "events_url": format!("{api}/events"),
            "received_events_url": format!("{api}/received_events"),
            "type": "User",
            "site_admin": false,
        })
    }

    fn branch(name: &str) -> Value {
        json!({ "label": format!("octo:{name}"), "ref": name, "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e" })
    }

    fn pull_request(number: u64, user: Value, extra: Value) -> PullRequest {
        let mut payload = json!({
            "url": format!("https://api.github.com/repos/octo/hello/pulls/{number}"),
            "id": 1000 + number,
            "number": number,
            "html_url": format!("https://github.com/octo/hello/pull/{number}"),
            "title": "Add feature",
            "state": "open",
            "locked": false,
            "user": user,
            "created_at": "2024-05-01T10:00:00Z",
            "merged_at": null,
            "head": branch("feature"),
            "base": branch("main"),
        });
        for (key, value) in extra.as_object().cloned().unwrap_or_default() {
            payload[key] = value;
        }
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn merged_pull_request() {
        let pr = pull_request(
            12,
            user("alice"),
            json!({ "state": "closed", "merged_at": "2024-05-02T11:00:00Z" }),
        );

        let record = PullRequestRecord::try_from(pr).unwrap();

        assert_eq!(record.number, 12);
        assert_eq!(record.title, "Add feature");
        assert_eq!(record.state, PRState::Closed);
        assert_eq!(record.author(), Some("alice"));
        assert_eq!(
            record.author_avatar_url.as_deref(),
            Some("https://avatars.githubusercontent.com/alice")
        );
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(
            record.merged_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 11, 0, 0).unwrap())
        );
        assert_eq!(record.html_url, "https://github.com/octo/hello/pull/12");
    }

    #[test]
    fn deleted_author() {
        let record = PullRequestRecord::try_from(pull_request(11, Value::Null, json!({}))).unwrap();

        assert_eq!(record.state, PRState::Open);
        assert_eq!(record.author_login, None);
        assert_eq!(record.author_avatar_url, None);
    }

    #[test]
    fn creation_time_is_required() {
        let pr = pull_request(10, user("bob"), json!({ "created_at": null }));

        assert!(PullRequestRecord::try_from(pr).is_err());
    }
}

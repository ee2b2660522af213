use std::collections::HashMap;

use super::{GithubHandle, PullRequestRecord, PullRequestSummary};

pub type Rank = u32;
pub type Score = u32;

pub const TOP_SCORE: Score = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ContributorEntry {
    pub username: GithubHandle,
    pub pull_request_count: u32,
    pub pull_requests: Vec<PullRequestSummary>,
    pub avatar_url: String,
}

impl ContributorEntry {
    fn new(username: GithubHandle, avatar_url: Option<&str>) -> Self {
        Self {
            username,
            pull_request_count: 0,
            pull_requests: Vec::new(),
            avatar_url: avatar_url.unwrap_or_default().to_string(),
        }
    }

    fn add(&mut self, pr: &PullRequestRecord) {
        self.pull_request_count += 1;
        self.pull_requests.push(pr.into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedContributor {
    pub contributor: ContributorEntry,
    pub rank: Rank,
    pub score: Score,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub contributors: Vec<RankedContributor>,
    /// Every record seen, including those without an author.
    pub total_count: usize,
}

impl Leaderboard {
    /// Groups records by author and ranks the authors by pull request count.
    ///
    /// Records are expected in fetch order (newest first). Ties keep the
    /// order in which usernames were first seen, and each contributor's
    /// avatar comes from their first record.
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a PullRequestRecord>) -> Self {
        let mut index: HashMap<GithubHandle, usize> = HashMap::new();
        let mut entries: Vec<ContributorEntry> = Vec::new();
        let mut total_count = 0;

        for pr in records {
            total_count += 1;
            let Some(author) = pr.author() else {
                continue;
            };

            let position = *index.entry(author.to_string()).or_insert_with(|| {
                entries.push(ContributorEntry::new(
                    author.to_string(),
                    pr.author_avatar_url.as_deref(),
                ));
                entries.len() - 1
            });
            entries[position].add(pr);
        }

        // `sort_by` is stable, so equal counts stay in first-seen order
        entries.sort_by(|a, b| b.pull_request_count.cmp(&a.pull_request_count));

        let total_members = entries.len() as u32;
        let contributors = entries
            .into_iter()
            .enumerate()
            .map(|(position, contributor)| {
                let rank = position as Rank + 1;
                RankedContributor {
                    contributor,
                    rank,
                    score: score(rank, total_members),
                }
            })
            .collect();

        Self {
            contributors,
            total_count,
        }
    }

    pub fn total_members(&self) -> usize {
        self.contributors.len()
    }
}

/// Score for `rank` out of `total_members`.
///
/// First place always gets [`TOP_SCORE`]. Everyone else gets
/// `100 * (total_members - rank + 1) / total_members`, rounded half-up.
pub fn score(rank: Rank, total_members: u32) -> Score {
    if rank <= 1 || total_members == 0 {
        return TOP_SCORE;
    }

    let total = u64::from(total_members);
    let remaining = u64::from(total_members.saturating_sub(rank)) + 1;
    // round(x / m) == floor((2x + m) / 2m) for non-negative x
    let score = (2 * u64::from(TOP_SCORE) * remaining + total) / (2 * total);
    Score::try_from(score).unwrap_or(TOP_SCORE)
}

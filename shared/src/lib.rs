#[cfg(feature = "github")]
mod github;
mod leaderboard;
mod pr;

pub use leaderboard::*;
pub use pr::*;

pub type GithubHandle = String;

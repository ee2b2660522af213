#[macro_use]
extern crate rocket;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use pr_leaderboard_server::config::Env;

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().pretty());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let env = envy::from_env::<Env>().expect("Failed to load environment variables");
    tracing::info!("Using GitHub API at {}", env.github_api_url);

    pr_leaderboard_server::build(env).expect("Failed to configure server")
}

#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_prometheus::PrometheusMetrics;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod entrypoints;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod session;
pub mod since;
pub mod types;

use config::Env;
use entrypoints::ApiDoc;

/// Assembles the HTTP service. Each request reaches GitHub with its own
/// credential.
pub fn build(env: Env) -> anyhow::Result<Rocket<Build>> {
    let allowed_origins = match env.allowed_origins() {
        Some(origins) => AllowedOrigins::some_exact(origins.as_slice()),
        None => AllowedOrigins::all(),
    };
    let cors = CorsOptions {
        allowed_origins,
        ..Default::default()
    }
    .to_cors()?;

    let prometheus = PrometheusMetrics::new();

    Ok(rocket::build()
        .manage(env)
        .attach(cors)
        .attach(prometheus.clone())
        .mount("/metrics", prometheus)
        .mount(
            "/",
            SwaggerUi::new("/swagger-ui/<_..>").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .attach(entrypoints::stage()))
}

use rocket::serde::json::Json;

use crate::types::HealthResponse;

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "Service is up", body = HealthResponse)
))]
#[get("/health")]
async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing health entrypoint", |rocket| async {
        rocket.mount("/api", rocket::routes![get_health])
    })
}

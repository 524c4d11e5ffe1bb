use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::IntakeService;

#[utoipa::path(
    get,
    path = "/intake/options",
    tag = "intake",
    responses(
        (status = 200, description = "Form catalogs and defaults", body = IntakeOptionsResponse)
    )
)]
pub async fn get_options(intake_service: web::Data<IntakeService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": IntakeOptionsResponse::new(intake_service.home_country_code())
    })))
}

#[utoipa::path(
    get,
    path = "/intake/format-number",
    tag = "intake",
    params(
        ("country_code" = String, Query, description = "Selected dial code"),
        ("value" = String, Query, description = "Number as typed so far")
    ),
    responses(
        (status = 200, description = "Formatted number", body = FormatNumberResponse),
        (status = 400, description = "Missing query parameters")
    )
)]
pub async fn format_number(
    intake_service: web::Data<IntakeService>,
    query: web::Query<FormatNumberQuery>,
) -> Result<HttpResponse> {
    let formatted = intake_service.format_number(&query.country_code, &query.value);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": formatted
    })))
}

#[utoipa::path(
    post,
    path = "/intake",
    tag = "intake",
    request_body = IntakeRequest,
    responses(
        (status = 200, description = "Profile created", body = IntakeResponse),
        (status = 400, description = "Invalid form fields"),
        (status = 502, description = "Submission rejected by the database")
    )
)]
pub async fn submit(
    intake_service: web::Data<IntakeService>,
    request: web::Json<IntakeRequest>,
) -> Result<HttpResponse> {
    let (_, result) = intake_service.submit_request(&request).await;

    match result {
        Ok(customer_id) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": IntakeResponse { customer_id },
            "message": "Welcome to Play Barbados!"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn intake_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/intake")
            .route("", web::post().to(submit))
            .route("/options", web::get().to(get_options))
            .route("/format-number", web::get().to(format_number)),
    );
}

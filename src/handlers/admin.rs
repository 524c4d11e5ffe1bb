use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::dashboard::DashboardFilter;
use crate::models::*;
use crate::services::{AdminService, CsvExport};

/// Plain `filename` for clients that ignore `filename*`. Anything outside
/// printable ASCII, and any quote or backslash, becomes `_`.
fn ascii_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect()
}

/// `attachment` with an ASCII `filename` plus the exact name as UTF-8 `filename*`.
fn attachment(filename: &str) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![
            DispositionParam::Filename(ascii_filename(filename)),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".into()),
                language_tag: None,
                value: filename.as_bytes().to_vec(),
            }),
        ],
    }
}

fn csv_response(export: CsvExport) -> HttpResponse {
    log::info!("Exported {} rows to {}", export.rows, export.filename);
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(attachment(&export.filename))
        .body(export.content)
}

#[utoipa::path(
    post,
    path = "/admin/refresh",
    tag = "admin",
    responses(
        (status = 200, description = "All collections reloaded"),
        (status = 502, description = "Customers, consoles or categories could not be fetched")
    )
)]
pub async fn refresh(admin_service: web::Data<AdminService>) -> Result<HttpResponse> {
    match admin_service.load().await {
        Ok(()) => {
            let stats = admin_service.stats(&DashboardFilter::default()).await;
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": stats,
                "message": "Dashboard data reloaded"
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/customers",
    tag = "admin",
    params(CustomerFilterQuery),
    responses(
        (status = 200, description = "Filtered customers", body = CustomerListResponse)
    )
)]
pub async fn list_customers(
    admin_service: web::Data<AdminService>,
    query: web::Query<CustomerFilterQuery>,
) -> Result<HttpResponse> {
    let filter = DashboardFilter::from(query.into_inner());
    let customers = admin_service.list_customers(&filter).await;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": customers
    })))
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    params(CustomerFilterQuery),
    responses(
        (status = 200, description = "Dashboard totals", body = DashboardStats)
    )
)]
pub async fn get_stats(
    admin_service: web::Data<AdminService>,
    query: web::Query<CustomerFilterQuery>,
) -> Result<HttpResponse> {
    let filter = DashboardFilter::from(query.into_inner());
    let stats = admin_service.stats(&filter).await;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": stats
    })))
}

#[utoipa::path(
    get,
    path = "/admin/prizes",
    tag = "admin",
    responses(
        (status = 200, description = "Prize catalog", body = [PrizeOptionItem])
    )
)]
pub async fn get_prizes() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": prize_options()
    })))
}

#[utoipa::path(
    get,
    path = "/admin/customers/{id}/edit",
    tag = "admin",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Editable fields", body = CustomerEdit),
        (status = 404, description = "Customer not loaded")
    )
)]
pub async fn get_edit_seed(
    admin_service: web::Data<AdminService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match admin_service.edit_seed(&path).await {
        Ok(edit) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": edit
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/customers/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Customer id")),
    request_body = CustomerEdit,
    responses(
        (status = 200, description = "Customer saved", body = Customer),
        (status = 400, description = "Malformed WhatsApp number"),
        (status = 404,description = "Customer not loaded"),
        (status = 502, description = "Update rejected by the database")
    )
)]
pub async fn update_customer(
    admin_service: web::Data<AdminService>,
    path: web::Path<String>,
    request: web::Json<CustomerEdit>,
) -> Result<HttpResponse> {
    match admin_service
        .update_customer(&path, request.into_inner())
        .await
    {
        Ok(customer) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": customer
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/customers/{id}/wheel-spin",
    tag = "admin",
    params(("id" = String, Path, description = "Customer id")),
    request_body = WheelSpinToggleRequest,
    responses(
        (status = 200, description = "Wheel spin recorded", body = WheelSpinToggleResponse),
        (status = 404, description = "Customer not loaded"),
        (status = 502, description = "Update rejected by the database")
    )
)]
pub async fn set_wheel_spin(
    admin_service: web::Data<AdminService>,
    path: web::Path<String>,
    request: web::Json<WheelSpinToggleRequest>,
) -> Result<HttpResponse> {
    match admin_service
        .set_wheel_spin(&path, request.has_spun_wheel)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/customers/{id}/prizes",
    tag = "admin",
    params(("id" = String, Path, description = "Customer id")),
    request_body = PrizeToggleRequest,
    responses(
        (status = 200, description = "Prizes held after the change", body = [CustomerPrize]),
        (status = 400, description = "Unknown prize or wheel not spun"),
        (status = 404, description = "Customer not loaded"),
        (status = 502, description = "Update rejected by the database")
    )
)]
pub async fn set_prize(
    admin_service: web::Data<AdminService>,
    path: web::Path<String>,
    request: web::Json<PrizeToggleRequest>,
) -> Result<HttpResponse> {
    match admin_service
        .set_prize(&path, &request.prize_value, request.checked)
        .await
    {
        Ok(prizes) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": prizes
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/export/customers.csv",
    tag = "admin",
    params(CustomerFilterQuery),
    responses(
        (status = 200, description = "CSV of the filtered customers", content_type = "text/csv")
    )
)]
pub async fn export_customers(
    admin_service: web::Data<AdminService>,
    query: web::Query<CustomerFilterQuery>,
) -> Result<HttpResponse> {
    let filter = DashboardFilter::from(query.into_inner());
    Ok(csv_response(admin_service.export_customers(&filter).await))
}

#[utoipa::path(
    get,
    path = "/admin/export/prize-winners.csv",
    tag = "admin",
    responses(
        (status = 200, description = "CSV of every prize winner", content_type = "text/csv")
    )
)]
pub async fn export_prize_winners(admin_service: web::Data<AdminService>) -> Result<HttpResponse> {
    Ok(csv_response(admin_service.export_prize_winners().await))
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/refresh", web::post().to(refresh))
            .route("/stats", web::get().to(get_stats))
            .route("/prizes", web::get().to(get_prizes))
            .route("/customers", web::get().to(list_customers))
            .route("/customers/{id}", web::put().to(update_customer))
            .route("/customers/{id}/edit", web::get().to(get_edit_seed))
            .route("/customers/{id}/wheel-spin", web::put().to(set_wheel_spin))
            .route("/customers/{id}/prizes", web::put().to(set_prize))
            .route("/export/customers.csv", web::get().to(export_customers))
            .route("/export/prize-winners.csv", web::get().to(export_prize_winners)),
    );
}

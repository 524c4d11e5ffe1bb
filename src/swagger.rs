use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dashboard::WheelSpinFilter;
use crate::handlers;
use crate::intake::{FieldError, FormField};
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::intake::get_options,
        handlers::intake::format_number,
        handlers::intake::submit,
        handlers::admin::refresh,
        handlers::admin::list_customers,
        handlers::admin::get_stats,
        handlers::admin::get_prizes,
        handlers::admin::get_edit_seed,
        handlers::admin::update_customer,
        handlers::admin::set_wheel_spin,
        handlers::admin::set_prize,
        handlers::admin::export_customers,
        handlers::admin::export_prize_winners,
    ),
    components(
        schemas(
            IntakeRequest,
            IntakeResponse,
            IntakeOptionsResponse,
            FormatNumberResponse,
            OptionItem,
            ShopCategory,
            Console,
            RetroConsole,
            Customer,
            CustomerConsole,
            CustomerShoppingCategory,
            CustomerWheelSpin,
            CustomerPrize,
            CustomerOverview,
            CustomerListResponse,
            CustomerEdit,
            WheelSpinFilter,
            WheelSpinToggleRequest,
            WheelSpinToggleResponse,
            PrizeToggleRequest,
            PrizeOptionItem,
            DashboardStats,
            ApiError,
            ApiErrorResponse,
            FieldError,
            FormField,
        )
    ),
    tags(
        (name = "intake", description = "Customer intake form API"),
        (name = "admin", description = "Admin dashboard API"),
    ),
    info(
        title = "Play Barbados Backend API",
        version = "1.0.0",
        description = "Customer intake and loyalty dashboard REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

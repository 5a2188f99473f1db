use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{MealStatus, OrderStatus, Role, Weekday};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::owner_register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::service_profile::get_profile,
        handlers::service_profile::update_profile,
        handlers::menu::list_menus,
        handlers::menu::create_menu,
        handlers::menu::get_menu,
        handlers::menu::update_menu,
        handlers::menu::delete_menu,
        handlers::menu::list_plans,
        handlers::menu::create_plan,
        handlers::menu::list_daily_menus,
        handlers::menu::create_daily_menu,
        handlers::enrollment::subscribe,
        handlers::enrollment::list_enrollments,
        handlers::enrollment::get_enrollment,
        handlers::tracking::list_days,
        handlers::tracking::mark_day,
        handlers::tracking::toggle_day,
        handlers::dashboard::owner_dashboard,
        handlers::dashboard::customer_dashboard,
        handlers::order::list_orders,
        handlers::order::place_order,
        handlers::order::mark_delivered,
        handlers::review::list_reviews,
        handlers::review::create_review,
    ),
    components(
        schemas(
            Role,
            Weekday,
            MealStatus,
            OrderStatus,
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            UserResponse,
            AuthResponse,
            ServiceProfileResponse,
            UpdateServiceProfileRequest,
            WeeklyMeals,
            CreateMenuRequest,
            UpdateMenuRequest,
            MenuResponse,
            CreatePlanRequest,
            PlanResponse,
            CreateDailyMenuRequest,
            DailyMenuResponse,
            SubscribeRequest,
            EnrollmentState,
            EnrollmentResponse,
            MarkDayRequest,
            TrackingEntryResponse,
            MarkDayResponse,
            OwnerRevenue,
            CustomerStats,
            PlaceOrderRequest,
            OrderResponse,
            CreateReviewRequest,
            ReviewResponse,
            ReviewListResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and token refresh"),
        (name = "service_profile", description = "Owner's tiffin service profile"),
        (name = "menu", description = "Menus, subscription plans and daily menus"),
        (name = "enrollment", description = "Subscriptions and their lifecycle"),
        (name = "tracking", description = "Daily meal tracking"),
        (name = "dashboard", description = "Owner revenue and customer stats"),
        (name = "order", description = "One-off meal orders"),
        (name = "review", description = "Service reviews"),
    ),
    info(
        title = "Apna Dabba API",
        version = "0.1.0",
        description = "Meal subscription backend REST API"
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_lifecycle_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/plans/{id}/subscribe"));
        assert!(paths.contains_key("/enrollments/{id}/tracking/{date}/toggle"));
        assert!(paths.contains_key("/dashboard/owner"));
    }
}

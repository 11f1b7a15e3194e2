//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{PaymentService, RegistrationService, ReservationService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{
    admin_middleware, auth_middleware, optional_auth_middleware, AuthState,
};
use crate::interfaces::http::modules::{auth, bookings, health, payments, stations};

/// Unified state for all routes. Axum extracts each handler's own
/// state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub registration: Arc<RegistrationService>,
    pub reservations: Arc<ReservationService>,
    pub payments: Arc<PaymentService>,
    pub auth: AuthState,
    pub token_expiration_hours: i64,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for auth::AuthAppState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthAppState {
            registration: Arc::clone(&s.registration),
            token_expiration_hours: s.token_expiration_hours,
        }
    }
}

impl FromRef<AppState> for stations::StationAppState {
    fn from_ref(s: &AppState) -> Self {
        stations::StationAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<AppState> for bookings::BookingAppState {
    fn from_ref(s: &AppState) -> Self {
        bookings::BookingAppState {
            reservations: Arc::clone(&s.reservations),
        }
    }
}

impl FromRef<AppState> for payments::PaymentAppState {
    fn from_ref(s: &AppState) -> Self {
        payments::PaymentAppState {
            payments: Arc::clone(&s.payments),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::verify_otp,
        auth::set_password,
        auth::resend_otp,
        auth::login,
        // Stations
        stations::create_station,
        stations::list_stations,
        stations::get_station,
        // Bookings
        bookings::create_booking,
        bookings::cancel_booking,
        bookings::get_booking,
        bookings::list_bookings,
        // Payments
        payments::confirm_payment,
        payments::get_payment_by_booking,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            // Auth
            auth::RegisterRequest,
            auth::VerifyOtpRequest,
            auth::SetPasswordRequest,
            auth::ResendOtpRequest,
            auth::LoginRequest,
            auth::MessageResponse,
            auth::SessionResponse,
            auth::AccountInfo,
            // Stations
            stations::CreateStationRequest,
            stations::CompanyInput,
            stations::StationDto,
            // Bookings
            bookings::CreateBookingRequest,
            bookings::BookingDto,
            // Payments
            payments::ConfirmPaymentRequest,
            payments::PaymentDto,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "OTP-gated registration and JWT login"),
        (name = "Stations", description = "Charging station directory"),
        (name = "Bookings", description = "Slot reservation and cancellation"),
        (name = "Payments", description = "Booking confirmation payments"),
    ),
    info(
        title = "EVSlot Booking Service API",
        version = "1.0.0",
        description = "REST API for booking charging slots at EV stations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let auth_state = state.auth.clone();

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/set-password", post(auth::set_password))
        .route("/resend-otp", post(auth::resend_otp))
        .route("/login", post(auth::login));

    // Station creation is admin-gated; reads are public
    let station_admin_routes = Router::new()
        .route("/", post(stations::create_station))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));
    let station_routes = Router::new()
        .route("/", get(stations::list_stations))
        .route("/{station_id}", get(stations::get_station))
        .merge(station_admin_routes);

    // Booking creation works for guests; a bearer token binds the account
    let booking_admin_routes = Router::new()
        .route("/", get(bookings::list_bookings))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/{booking_id}", get(bookings::get_booking))
        .route("/{booking_id}/cancel", post(bookings::cancel_booking))
        .layer(middleware::from_fn_with_state(
            auth_state,
            optional_auth_middleware,
        ))
        .merge(booking_admin_routes);

    let payment_routes = Router::new()
        .route("/confirm", post(payments::confirm_payment))
        .route(
            "/by-booking/{booking_id}",
            get(payments::get_payment_by_booking),
        );

    let api = Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes)
        .nest("/stations", station_routes)
        .nest("/bookings", booking_routes)
        .nest("/payments", payment_routes);

    Router::new()
        .nest("/api/v1", api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

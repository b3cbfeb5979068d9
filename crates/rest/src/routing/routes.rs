//! EMR route configuration.
//!
//! Defines all routes for the EMR REST API.

use axum::{
    Router,
    extract::FromRequestParts,
    routing::{get, post},
};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::{
    Appointment, BillingRecord, Encounter, Identifiable, LabOrder, LabResult, Prescription,
};

use crate::auth::{CurrentUser, PhysicianOnly, RequireRole, StaffOnly};
use crate::handlers::{self, records};
use crate::state::AppState;

/// Creates all EMR REST API routes.
///
/// # Routes
///
/// ## Public
/// - `GET /` - Status
/// - `GET /health` - Health check
/// - `GET /metrics` - Prometheus metrics
/// - `POST /Patient`, `GET /Patient`, `GET /Patient/{id}` - Patients
/// - `GET /audit` - Audit log
/// - `POST /token` - Login
/// - `POST /signup` - Account creation
/// - `POST /demo/create-user` - Demo accounts (when enabled)
///
/// ## Authenticated
/// - `GET /users/me` - Any user
/// - `GET /admin/users` - Admin only
/// - `/appointments`, `/lab-orders`, `/lab-results` - Any user
/// - `/encounters`, `/prescriptions` - Physician only
/// - `/billing` - Staff only
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + 'static,
{
    let mut router = Router::new()
        // System routes
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/metrics", get(handlers::metrics_handler::<S>))
        // Patients
        .route(
            "/Patient",
            post(handlers::create_patient_handler::<S>).get(handlers::list_patients_handler::<S>),
        )
        .route("/Patient/{id}", get(handlers::read_patient_handler::<S>))
        // Audit
        .route("/audit", get(handlers::audit_logs_handler::<S>))
        // Accounts
        .route("/token", post(handlers::token_handler::<S>))
        .route("/signup", post(handlers::signup_handler::<S>))
        .route("/users/me", get(handlers::me_handler))
        .route("/admin/users", get(handlers::list_users_handler::<S>));

    if state.config().enable_demo_routes {
        router = router.route(
            "/demo/create-user",
            post(handlers::create_demo_user_handler::<S>),
        );
    }

    router
        .merge(record_routes::<S, Appointment, CurrentUser>("/appointments"))
        .merge(record_routes::<S, Encounter, RequireRole<PhysicianOnly>>("/encounters"))
        .merge(record_routes::<S, Prescription, RequireRole<PhysicianOnly>>("/prescriptions"))
        .merge(record_routes::<S, LabOrder, CurrentUser>("/lab-orders"))
        .merge(record_routes::<S, LabResult, CurrentUser>("/lab-results"))
        .merge(record_routes::<S, BillingRecord, RequireRole<StaffOnly>>("/billing"))
        .with_state(state)
}

/// Create, list and read routes for one record type behind guard `G`.
fn record_routes<S, R, G>(base: &str) -> Router<AppState<S>>
where
    S: DocumentStore + 'static,
    R: Identifiable + 'static,
    G: FromRequestParts<AppState<S>> + Send + 'static,
{
    Router::new()
        .route(
            base,
            post(records::create_record_handler::<S, R, G>)
                .get(records::list_records_handler::<S, R, G>),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(records::read_record_handler::<S, R, G>),
        )
}

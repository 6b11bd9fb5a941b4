pub mod applications;
pub mod auth;
pub mod health;
pub mod materials;
pub mod patients;
pub mod profile;
pub mod records;
pub mod schedule;
pub mod services;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the page and action route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                   layout shell (public)
///
/// /auth/login                         form defaults, login (GET, POST)
/// /auth/logout                        logout (POST)
///
/// /profile                            own profile (signed in)
/// /profile/edit                       edit profile (POST)
/// /profile/change-password            change password (POST)
///
/// /users                              staff list (admin)
/// /users/create                       create staff (POST)
/// /users/{id}/edit                    edit staff (POST)
///
/// /patients                           list, create (patients feature)
/// /patients/{id}                      detail + records (doctor, nurse)
/// /patients/{id}/edit                 edit patient (POST)
///
/// /records/{id}                       record + prescription
/// /records/{id}/edit                  edit record (POST)
/// /records/{id}/prescription          add prescription line (POST)
///
/// /schedule                           week calendar (?date=)
/// /schedule/create                    book appointment (POST)
/// /schedule/{id}/edit                 edit appointment (POST)
/// /schedule/confirm/{token}           patient confirmation (public)
///
/// /services                           treatments, create (POST /create)
///
/// /materials                          inventory with catalogues
/// /materials/imports                  import history
/// /materials/exports                  export groups
/// /materials/create                   create material (POST)
/// /materials/types/create             create material type (POST)
/// /materials/suppliers/create         create supplier (POST)
/// /materials/import                   import batch (POST)
/// /materials/export                   request export (POST)
/// /materials/export/edit              assign export (POST)
///
/// /invoices                           payments (payment feature)
/// /statistic                          dashboard figures (statistic feature)
///
/// /applications                       leave applications (admin)
/// /applications/create                file application (POST, staff)
/// ```
pub fn page_routes() -> Router<AppState> {
    Router::new()
        // Layout shell shared by every page.
        .route("/", get(handlers::layout::shell))
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/users", users::router())
        .nest("/patients", patients::router())
        .nest("/records", records::router())
        .nest("/schedule", schedule::router())
        .nest("/services", services::router())
        .nest("/materials", materials::router())
        .route("/invoices", get(handlers::invoices::list))
        .route("/statistic", get(handlers::statistic::show))
        .nest("/applications", applications::router())
}

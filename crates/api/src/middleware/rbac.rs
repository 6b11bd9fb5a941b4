//! Role-based access control (RBAC) extractors.
//!
//! A page names its requirement with a marker type implementing
//! [`PageAccess`]; [`Require`] runs the access filter against it before the
//! handler body executes. Redirects and denials come back as [`AppError`]s.

use std::marker::PhantomData;

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::header::{HOST, REFERER};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use clinic_core::access::{self, AccessDecision};
use clinic_core::features;
use clinic_core::identity::Identity;
use clinic_core::roles::{Role, RoleSet, STAFF_ROLES};

use crate::error::AppError;

/// The role set a page requires.
pub trait PageAccess {
    const ROLES: RoleSet;
}

/// Declares a marker type for each guarded page.
macro_rules! pages {
    ($($(#[$meta:meta])* $name:ident => $roles:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl PageAccess for $name {
                const ROLES: RoleSet = $roles;
            }
        )*
    };
}

pages! {
    /// Any signed-in caller.
    SignedIn => RoleSet::of(&[Role::All]);
    /// Staff accounts only.
    StaffOnly => RoleSet::of(&STAFF_ROLES);
    UsersPage => features::USERS_ROLES;
    ServicesPage => features::SERVICES_ROLES;
    MaterialsPage => features::MATERIALS_ROLES;
    PatientsPage => features::PATIENTS_ROLES;
    PatientDetailPage => RoleSet::of(&[Role::Doctor, Role::Nurse]);
    RecordsPage => RoleSet::of(&[Role::Doctor, Role::Accountant, Role::Patient]);
    SchedulePage => features::SCHEDULE_ROLES;
    PaymentPage => features::PAYMENT_ROLES;
    StatisticPage => features::STATISTIC_ROLES;
    ApplicationsPage => features::APPLICATIONS_ROLES;
}

/// Sections whose root path is a page a browser can GET.
const SECTION_PAGES: [&str; 9] = [
    "profile",
    "users",
    "patients",
    "schedule",
    "services",
    "materials",
    "invoices",
    "statistic",
    "applications",
];

/// Where to send the caller back to after login.
///
/// Pages return to themselves. Actions only accept POST or PUT, so they
/// return to the page that posted them (a same-host `Referer`), or else to
/// the root of their section.
fn original_target(parts: &Parts) -> String {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(&parts.uri);

    if parts.method == Method::GET || parts.method == Method::HEAD {
        return uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());
    }

    referring_page(&parts.headers).unwrap_or_else(|| section_page(uri.path()))
}

fn referring_page(headers: &HeaderMap) -> Option<String> {
    let referer: Uri = headers.get(REFERER)?.to_str().ok()?.parse().ok()?;
    if let Some(authority) = referer.authority() {
        let host = headers.get(HOST)?.to_str().ok()?;
        if !authority.as_str().eq_ignore_ascii_case(host) {
            return None;
        }
    }
    let target = referer.path_and_query()?.as_str();
    target.starts_with('/').then(|| target.to_string())
}

fn section_page(path: &str) -> String {
    match path.split('/').find(|segment| !segment.is_empty()) {
        Some(section) if SECTION_PAGES.contains(&section) => format!("/{section}"),
        _ => "/".to_string(),
    }
}

/// The signed-in caller of a page guarded by `P`.
///
/// ```ignore
/// async fn users(Require(user, _): Require<UsersPage>) -> AppResult<Json<()>> {
///     // user holds at least one of the roles UsersPage requires
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Require<P>(pub Identity, pub PhantomData<P>);

impl<P: PageAccess, S: Send + Sync> FromRequestParts<S> for Require<P> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let target = original_target(parts);
        let identity = parts.extensions.get::<Identity>();

        match access::check(identity, P::ROLES, &target) {
            AccessDecision::Allow => identity
                .cloned()
                .map(|identity| Require(identity, PhantomData))
                .ok_or_else(|| AppError::Redirect(access::login_redirect(&target))),
            AccessDecision::Redirect(location) => Err(AppError::Redirect(location)),
            AccessDecision::Deny(denial) => {
                tracing::info!(
                    path = %target,
                    status = denial.status_code(),
                    "Access denied"
                );
                Err(AppError::Denied(denial))
            }
        }
    }
}

/// Admits only anonymous callers (the login page).
#[derive(Debug, Clone, Copy)]
pub struct AnonymousOnly;

impl<S: Send + Sync> FromRequestParts<S> for AnonymousOnly {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let target = original_target(parts);
        let required = RoleSet::of(&[Role::UnauthenticatedOnly]);
        match access::check(parts.extensions.get::<Identity>(), required, &target) {
            AccessDecision::Allow => Ok(AnonymousOnly),
            AccessDecision::Redirect(location) => Err(AppError::Redirect(location)),
            AccessDecision::Deny(denial) => Err(AppError::Denied(denial)),
        }
    }
}

//! Session middleware and access extractors.
//!
//! - [`session::resolve_session`] -- Decodes the `access-token` cookie into an
//!   [`Identity`](clinic_core::identity::Identity) request extension.
//! - [`auth::MaybeUser`] -- The caller's identity, if any.
//! - [`rbac::Require`] -- Runs the access filter for a page's role set.
//! - [`rbac::AnonymousOnly`] -- Pages a signed-in caller must not reach.

pub mod auth;
pub mod rbac;
pub mod session;

//! Session primitives.
//!
//! - [`jwt`] -- access-token verification and the claims it carries.
//! - [`cookie`] -- the `access-token` cookie set on login and cleared on logout.

pub mod cookie;
pub mod jwt;

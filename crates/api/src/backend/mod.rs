//! Everything that talks to the clinic REST backend.
//!
//! - [`endpoints`] -- logical operation names and the URLs they resolve to.
//! - [`normalize`] -- classification of failed calls into one [`HttpError`].
//! - [`client`] -- the shared HTTP client handlers build requests from.

pub mod client;
pub mod endpoints;
pub mod normalize;

pub use client::{BackendClient, BackendRequest};
pub use endpoints::{Endpoint, EndpointRegistry};
pub use normalize::{FetchError, HttpError};

//! Upstream Playfolio API access: HTTP client, per-route operation metadata
//! and envelope reshaping.

pub mod client;
pub mod envelope;
pub mod operation;

pub use client::{PlayfolioClient, UpstreamRequest, UpstreamResponse};
pub use envelope::{Collection, CountRule};
pub use operation::{Failure, Operation};

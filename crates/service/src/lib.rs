//! Service layer of the Playfolio admin dashboard.
//! - `upstream` forwards calls to the Playfolio REST API and reshapes envelopes.
//! - `services` holds one module per proxied resource.
//! - `dashboard` composes those calls into paged, labelled views.
//! - `auth` and `file` keep the small amount of local state (admin session, API keys).

pub mod activity_filter;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod domain;
pub mod errors;
pub mod file;
pub mod lookup_cache;
pub mod pagination;
pub mod services;
pub mod storage;
pub mod upstream;

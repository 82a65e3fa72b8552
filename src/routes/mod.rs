//! HTTP route handlers grouped by resource domain.
//!
//! Public content routes live under `/api/v1`; the gated admin shell and the
//! admin JSON API live under the configured admin prefix. JSON handlers are
//! annotated with `#[openapi]` so `rocket_okapi` can derive an OpenAPI
//! document automatically; the redirect-heavy page routes are mounted
//! plainly.

pub mod clients;
pub mod contact;
pub mod content;
pub mod health;
pub mod messages;
pub mod pages;
pub mod projects;
pub mod transactions;

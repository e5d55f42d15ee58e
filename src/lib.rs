//! cinedb - a strict movie-catalog database with validated bulk ingestion
//!
//! Nine fixed relations (users, passwords, admins, directors, actors,
//! movies, reviews, acted-in roles, posters) behind a role-gated entry
//! surface. Rows enter only through the validated single-entry and bulk
//! ingestion paths; a batch commits atomically or not at all.

pub mod access;
pub mod api;
pub mod cli;
pub mod ingest;
pub mod schema;
pub mod store;
pub mod validate;

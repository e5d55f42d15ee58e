//! # Operation Surface
//!
//! The `Service` facade: gate first, then engine or store. Browse and
//! detail reads, the signed-in review path, user registration, single
//! and bulk entry, and poster upload all live here.

pub mod errors;
pub mod service;
pub mod view;

pub use errors::{ServiceError, ServiceResult};
pub use service::Service;
pub use view::{CastMember, MovieDetail, Page, PageOf, ReviewView};

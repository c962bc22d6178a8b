//! Directory use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and the query core into use-case APIs.
//! - Translate structural absence into not-found errors for callers.

pub mod activity_service;
pub mod building_service;
pub mod error;
pub mod organization_service;

/// Minimum length of free-text lookups (names, search queries).
pub const MIN_QUERY_CHARS: usize = 2;

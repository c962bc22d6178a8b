//! Directory domain model.
//!
//! # Responsibility
//! - Define the read-only projections the core consumes and returns.
//! - Keep entities free of derived links (no child pointers, no caches).
//!
//! # Invariants
//! - All values are constructed per request and never mutated by the core.

pub mod activity;
pub mod directory;
pub mod geo;

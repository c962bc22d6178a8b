//! Repository layer: storage contracts and an in-memory implementation.
//!
//! # Responsibility
//! - Define use-case oriented read contracts for directory entities.
//! - Keep storage details out of services and the query core.
//!
//! # Invariants
//! - Repositories are read-only.
//! - Missing rows are reported as `None`/empty, storage faults as `RepoError`.

pub mod directory_repo;
pub mod memory_repo;

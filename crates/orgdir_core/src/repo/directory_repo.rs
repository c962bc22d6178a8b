//! Repository contracts for directory entities.
//!
//! # Responsibility
//! - Describe what services need from storage, nothing more.
//! - Let storage pre-restrict candidates (rectangle, limit) before the core
//!   filters them.
//!
//! # Invariants
//! - Organization lists are ordered by name.
//! - Activity lists are ordered by `(level, name)`.
//! - Building lists are ordered by id.
//! - Absence is `Ok(None)`, never an error.

use crate::model::activity::{ActivityId, ActivityNode};
use crate::model::directory::{Building, BuildingId, Organization, OrganizationId};
use crate::model::geo::BoundingBox;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure reported by a repository implementation.
#[derive(Debug)]
pub enum RepoError {
    /// Backend could not be reached or refused the query.
    Unavailable(String),
    /// Stored data cannot be mapped to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "directory storage unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid directory data: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Read access to the activity taxonomy.
pub trait ActivityRepository {
    /// Every activity node, ordered by `(level, name)`.
    fn list_all(&self) -> RepoResult<Vec<ActivityNode>>;
    fn get(&self, id: ActivityId) -> RepoResult<Option<ActivityNode>>;
    /// Case-insensitive exact lookup of a trimmed name.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<ActivityNode>>;
}

/// Read access to buildings.
pub trait BuildingRepository {
    /// Every building, ordered by id.
    fn list_all(&self) -> RepoResult<Vec<Building>>;
    fn get(&self, id: BuildingId) -> RepoResult<Option<Building>>;
}

/// Read access to organizations with their relations resolved.
pub trait OrganizationRepository {
    fn get(&self, id: OrganizationId) -> RepoResult<Option<Organization>>;
    /// Case-insensitive substring match on the trimmed query.
    fn search_by_name(&self, query: &str, limit: usize) -> RepoResult<Vec<Organization>>;
    fn list_by_building(&self, building_id: BuildingId) -> RepoResult<Vec<Organization>>;
    /// Organizations linked to any of `activity_ids`.
    fn list_by_activity_ids(&self, activity_ids: &[ActivityId]) -> RepoResult<Vec<Organization>>;
    /// Up to `limit` organizations whose building lies inside `bounds`.
    fn list_in_rectangle(&self, bounds: &BoundingBox, limit: usize)
        -> RepoResult<Vec<Organization>>;
}

impl<R: ActivityRepository + ?Sized> ActivityRepository for &R {
    fn list_all(&self) -> RepoResult<Vec<ActivityNode>> {
        (**self).list_all()
    }

    fn get(&self, id: ActivityId) -> RepoResult<Option<ActivityNode>> {
        (**self).get(id)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<ActivityNode>> {
        (**self).find_by_name(name)
    }
}

impl<R: BuildingRepository + ?Sized> BuildingRepository for &R {
    fn list_all(&self) -> RepoResult<Vec<Building>> {
        (**self).list_all()
    }

    fn get(&self, id: BuildingId) -> RepoResult<Option<Building>> {
        (**self).get(id)
    }
}

impl<R: OrganizationRepository + ?Sized> OrganizationRepository for &R {
    fn get(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        (**self).get(id)
    }

    fn search_by_name(&self, query: &str, limit: usize) -> RepoResult<Vec<Organization>> {
        (**self).search_by_name(query, limit)
    }

    fn list_by_building(&self, building_id: BuildingId) -> RepoResult<Vec<Organization>> {
        (**self).list_by_building(building_id)
    }

    fn list_by_activity_ids(&self, activity_ids: &[ActivityId]) -> RepoResult<Vec<Organization>> {
        (**self).list_by_activity_ids(activity_ids)
    }

    fn list_in_rectangle(
        &self,
        bounds: &BoundingBox,
        limit: usize,
    ) -> RepoResult<Vec<Organization>> {
        (**self).list_in_rectangle(bounds, limit)
    }
}

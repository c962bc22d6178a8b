//! In-memory directory repository.
//!
//! # Responsibility
//! - Back every repository contract with plain vectors.
//! - Reproduce the ordering and filtering rules a database backend applies.
//!
//! # Invariants
//! - Stored collections are never mutated by reads.
//! - Organizations are returned as owned clones with relations embedded.

use crate::model::activity::{ActivityId, ActivityNode};
use crate::model::directory::{Building, BuildingId, Organization, OrganizationId};
use crate::model::geo::{BoundingBox, LocatedEntity};
use crate::repo::directory_repo::{
    ActivityRepository, BuildingRepository, OrganizationRepository, RepoResult,
};

/// Directory snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    activities: Vec<ActivityNode>,
    buildings: Vec<Building>,
    organizations: Vec<Organization>,
}

impl InMemoryDirectory {
    /// Creates a snapshot, normalizing storage order once up front.
    pub fn new(
        mut activities: Vec<ActivityNode>,
        mut buildings: Vec<Building>,
        mut organizations: Vec<Organization>,
    ) -> Self {
        activities.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        buildings.sort_by_key(|building| building.id);
        organizations.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            activities,
            buildings,
            organizations,
        }
    }

    fn organizations_where<F>(&self, limit: Option<usize>, predicate: F) -> Vec<Organization>
    where
        F: Fn(&Organization) -> bool,
    {
        self.organizations
            .iter()
            .filter(|&organization| predicate(organization))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

impl ActivityRepository for InMemoryDirectory {
    fn list_all(&self) -> RepoResult<Vec<ActivityNode>> {
        Ok(self.activities.clone())
    }

    fn get(&self, id: ActivityId) -> RepoResult<Option<ActivityNode>> {
        Ok(self.activities.iter().find(|node| node.id == id).cloned())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<ActivityNode>> {
        Ok(crate::hierarchy::find_by_name(&self.activities, name).cloned())
    }
}

impl BuildingRepository for InMemoryDirectory {
    fn list_all(&self) -> RepoResult<Vec<Building>> {
        Ok(self.buildings.clone())
    }

    fn get(&self, id: BuildingId) -> RepoResult<Option<Building>> {
        Ok(self.buildings.iter().find(|building| building.id == id).cloned())
    }
}

impl OrganizationRepository for InMemoryDirectory {
    fn get(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        Ok(self
            .organizations
            .iter()
            .find(|organization| organization.id == id)
            .cloned())
    }

    fn search_by_name(&self, query: &str, limit: usize) -> RepoResult<Vec<Organization>> {
        let needle = query.trim().to_lowercase();
        Ok(self.organizations_where(Some(limit), |organization| {
            organization.name.to_lowercase().contains(needle.as_str())
        }))
    }

    fn list_by_building(&self, building_id: BuildingId) -> RepoResult<Vec<Organization>> {
        Ok(self.organizations_where(None, |organization| {
            organization.building.id == building_id
        }))
    }

    fn list_by_activity_ids(&self, activity_ids: &[ActivityId]) -> RepoResult<Vec<Organization>> {
        Ok(self.organizations_where(None, |organization| {
            organization.has_any_activity(activity_ids)
        }))
    }

    fn list_in_rectangle(
        &self,
        bounds: &BoundingBox,
        limit: usize,
    ) -> RepoResult<Vec<Organization>> {
        Ok(self.organizations_where(Some(limit), |organization| {
            bounds.contains(organization.coordinate())
        }))
    }
}

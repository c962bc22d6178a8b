//! Building use-case service.

use crate::model::directory::{Building, BuildingId, Organization};
use crate::repo::directory_repo::{BuildingRepository, OrganizationRepository};
use crate::service::error::{ServiceError, ServiceResult};

/// Building service facade over building and organization storage.
pub struct BuildingService<B: BuildingRepository, O: OrganizationRepository> {
    buildings: B,
    organizations: O,
}

impl<B: BuildingRepository, O: OrganizationRepository> BuildingService<B, O> {
    pub fn new(buildings: B, organizations: O) -> Self {
        Self {
            buildings,
            organizations,
        }
    }

    /// Every building, ordered by id.
    pub fn list_buildings(&self) -> ServiceResult<Vec<Building>> {
        Ok(self.buildings.list_all()?)
    }

    /// Organizations hosted by one building.
    ///
    /// An existing building with no tenants yields an empty list; an unknown
    /// building is `BuildingNotFound`.
    pub fn organizations_in_building(
        &self,
        building_id: BuildingId,
    ) -> ServiceResult<Vec<Organization>> {
        if self.buildings.get(building_id)?.is_none() {
            return Err(ServiceError::BuildingNotFound(building_id));
        }
        Ok(self.organizations.list_by_building(building_id)?)
    }
}

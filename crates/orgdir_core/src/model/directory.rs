//! Building and organization read models.
//!
//! # Responsibility
//! - Define the directory entities returned by services.
//! - Expose building coordinates to the proximity filter.
//!
//! # Invariants
//! - Every organization is hosted by exactly one building.
//! - An organization's location is its building's location.

use crate::model::activity::{ActivityId, ActivityNode};
use crate::model::geo::{Coordinate, LocatedEntity};
use serde::{Deserialize, Serialize};

pub type BuildingId = i64;
pub type OrganizationId = i64;

/// A physical address hosting organizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    /// Unique postal address.
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Building {
    pub fn new(id: BuildingId, address: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id,
            address: address.into(),
            latitude: location.latitude,
            longitude: location.longitude,
            created_at: 0,
        }
    }
}

impl LocatedEntity for Building {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Contact number attached to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationPhone {
    pub phone_number: String,
}

/// Directory entry with its building, activities and phones resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    /// Unique display name.
    pub name: String,
    pub building: Building,
    /// Directly assigned activities (not their descendants).
    pub activities: Vec<ActivityNode>,
    pub phones: Vec<OrganizationPhone>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Organization {
    pub fn new(id: OrganizationId, name: impl Into<String>, building: Building) -> Self {
        Self {
            id,
            name: name.into(),
            building,
            activities: Vec::new(),
            phones: Vec::new(),
            created_at: 0,
        }
    }

    pub fn with_activities(mut self, activities: impl IntoIterator<Item = ActivityNode>) -> Self {
        self.activities.extend(activities);
        self
    }

    pub fn with_phones<S: Into<String>>(mut self, phones: impl IntoIterator<Item = S>) -> Self {
        self.phones
            .extend(phones.into_iter().map(|phone_number| OrganizationPhone {
                phone_number: phone_number.into(),
            }));
        self
    }

    /// Returns whether any directly assigned activity is in `activity_ids`.
    pub fn has_any_activity(&self, activity_ids: &[ActivityId]) -> bool {
        self.activities
            .iter()
            .any(|activity| activity_ids.contains(&activity.id))
    }
}

impl LocatedEntity for Organization {
    fn coordinate(&self) -> Coordinate {
        self.building.coordinate()
    }
}

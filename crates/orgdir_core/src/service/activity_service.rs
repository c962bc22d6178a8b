//! Activity use-case service.
//!
//! # Responsibility
//! - Render the activity forest for display.
//! - Resolve "organizations under this activity or any sub-activity".
//!
//! # Invariants
//! - The node list is reloaded per call; nothing is cached between calls.
//! - An unknown activity is a not-found error, never an empty listing.

use crate::hierarchy::{activity_tree, descendant_ids};
use crate::model::activity::{ActivityId, ActivityTreeNode};
use crate::model::directory::Organization;
use crate::repo::directory_repo::{ActivityRepository, OrganizationRepository};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::MIN_QUERY_CHARS;
use log::{debug, info};

/// Activity service facade over activity and organization storage.
pub struct ActivityService<A: ActivityRepository, O: OrganizationRepository> {
    activities: A,
    organizations: O,
}

impl<A: ActivityRepository, O: OrganizationRepository> ActivityService<A, O> {
    pub fn new(activities: A, organizations: O) -> Self {
        Self {
            activities,
            organizations,
        }
    }

    /// Returns the full activity forest.
    pub fn activity_tree(&self) -> ServiceResult<Vec<ActivityTreeNode>> {
        let nodes = self.activities.list_all()?;
        let forest = activity_tree(&nodes);
        debug!(
            "event=activity_tree module=service status=ok nodes={} roots={}",
            nodes.len(),
            forest.len()
        );
        Ok(forest)
    }

    /// Lists organizations linked to `activity_id` or any of its descendants.
    ///
    /// # Errors
    /// - `ActivityNotFound` when the id is not in the taxonomy.
    pub fn organizations_for_activity(
        &self,
        activity_id: ActivityId,
    ) -> ServiceResult<Vec<Organization>> {
        let nodes = self.activities.list_all()?;
        let closure = descendant_ids(&nodes, activity_id);
        if closure.is_empty() {
            info!(
                "event=activity_organizations module=service status=not_found activity_id={}",
                activity_id
            );
            return Err(ServiceError::ActivityNotFound(activity_id));
        }

        let organizations = self.organizations.list_by_activity_ids(&closure)?;
        debug!(
            "event=activity_organizations module=service status=ok activity_id={} closure={} organizations={}",
            activity_id,
            closure.len(),
            organizations.len()
        );
        Ok(organizations)
    }

    /// Same as [`Self::organizations_for_activity`], addressed by name.
    ///
    /// # Errors
    /// - `InvalidQuery` when the trimmed name is shorter than two characters.
    /// - `ActivityNameNotFound` when no activity matches case-insensitively.
    pub fn organizations_for_activity_name(&self, name: &str) -> ServiceResult<Vec<Organization>> {
        let trimmed = name.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(ServiceError::InvalidQuery(format!(
                "activity name must have at least {MIN_QUERY_CHARS} characters"
            )));
        }

        let activity = self
            .activities
            .find_by_name(trimmed)?
            .ok_or_else(|| ServiceError::ActivityNameNotFound(trimmed.to_string()))?;
        self.organizations_for_activity(activity.id)
    }
}

//! Organization use-case service.
//!
//! # Responsibility
//! - Look up, search and geographically locate organizations.
//! - Drive the nearby search: validate, over-fetch from storage, filter.
//!
//! # Invariants
//! - Nearby results never exceed the requested limit.
//! - Storage is asked once per nearby query; a short result is not retried.

use crate::geo::proximity::{filter_candidates, NearbyQuery};
use crate::model::directory::{Organization, OrganizationId};
use crate::repo::directory_repo::OrganizationRepository;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::MIN_QUERY_CHARS;
use log::{debug, info};

/// Largest accepted result limit for name search.
pub const SEARCH_LIMIT_MAX: u32 = 200;

/// Result limit applied to name search when the caller does not pick one.
pub const SEARCH_LIMIT_DEFAULT: u32 = 50;

/// Organization service facade.
pub struct OrganizationService<R: OrganizationRepository> {
    repo: R,
}

impl<R: OrganizationRepository> OrganizationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads one organization.
    pub fn get_organization(&self, id: OrganizationId) -> ServiceResult<Organization> {
        self.repo
            .get(id)?
            .ok_or(ServiceError::OrganizationNotFound(id))
    }

    /// Case-insensitive substring search over organization names.
    ///
    /// # Errors
    /// - `InvalidQuery` when the trimmed query has fewer than two characters
    ///   or `limit` is outside `1..=SEARCH_LIMIT_MAX`.
    pub fn search_organizations(&self, query: &str, limit: u32) -> ServiceResult<Vec<Organization>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Err(ServiceError::InvalidQuery(format!(
                "search query must have at least {MIN_QUERY_CHARS} characters"
            )));
        }
        if limit == 0 || limit > SEARCH_LIMIT_MAX {
            return Err(ServiceError::InvalidQuery(format!(
                "limit must be within 1..={SEARCH_LIMIT_MAX}, got {limit}"
            )));
        }
        Ok(self.repo.search_by_name(query, limit as usize)?)
    }

    /// Organizations within a radius of, or a rectangle around, a point.
    ///
    /// Radius mode requests `5 x limit` candidates inside the approximate
    /// bounding box (widened past poles and the antimeridian) and keeps
    /// those within the exact great-circle radius.
    /// Rectangle mode returns candidates as supplied, up to `limit`.
    ///
    /// # Errors
    /// - `Proximity` when neither a radius nor a full rectangle is supplied,
    ///   or any value is malformed.
    pub fn organizations_nearby(&self, query: &NearbyQuery) -> ServiceResult<Vec<Organization>> {
        let area = match query.resolve() {
            Ok(area) => area,
            Err(err) => {
                info!(
                    "event=nearby_search module=service status=rejected error={}",
                    err
                );
                return Err(err.into());
            }
        };

        let limit = query.limit as usize;
        let fetch_limit = area.fetch_limit(limit);
        let candidates = self.repo.list_in_rectangle(&area.bounds(), fetch_limit)?;
        let candidate_count = candidates.len();
        let matched = filter_candidates(candidates, &area, limit);

        debug!(
            "event=nearby_search module=service status=ok mode={} fetch_limit={} candidates={} matched={}",
            area.mode(),
            fetch_limit,
            candidate_count,
            matched.len()
        );
        Ok(matched)
    }
}

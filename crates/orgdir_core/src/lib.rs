//! Core query logic for the organization directory.
//! Activity hierarchy resolution and geospatial proximity search, plus the
//! read-only services and repository contracts built on top of them.

pub mod config;
pub mod geo;
pub mod hierarchy;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, Settings};
pub use geo::{
    bounding_box, filter_candidates, haversine_km, NearbyQuery, ProximityError, SearchArea,
    EARTH_RADIUS_KM, NEARBY_LIMIT_DEFAULT, NEARBY_LIMIT_MAX, RADIUS_OVERFETCH_MULTIPLIER,
};
pub use hierarchy::{activity_tree, build_adjacency, descendant_ids, ActivityAdjacency};
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::activity::{
    ActivityId, ActivityNode, ActivityTreeNode, ActivityValidationError, MAX_ACTIVITY_LEVEL,
};
pub use model::directory::{
    Building, BuildingId, Organization, OrganizationId, OrganizationPhone,
};
pub use model::geo::{BoundingBox, Coordinate, LocatedEntity};
pub use repo::directory_repo::{
    ActivityRepository, BuildingRepository, OrganizationRepository, RepoError, RepoResult,
};
pub use repo::memory_repo::InMemoryDirectory;
pub use service::activity_service::ActivityService;
pub use service::building_service::BuildingService;
pub use service::error::{ErrorKind, ServiceError, ServiceResult};
pub use service::organization_service::{
    OrganizationService, SEARCH_LIMIT_DEFAULT, SEARCH_LIMIT_MAX,
};

/// Minimal health-check API, mirrored by the HTTP layer's `/health`.
pub fn ping() -> &'static str {
    "ok"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

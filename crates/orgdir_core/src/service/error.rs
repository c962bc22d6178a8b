//! Service-level error type shared by directory use cases.

use crate::geo::proximity::ProximityError;
use crate::model::activity::ActivityId;
use crate::model::directory::{BuildingId, OrganizationId};
use crate::repo::directory_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse error category for transport mapping (404 / 400 / 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Storage,
}

/// Errors from directory service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// No activity with this id.
    ActivityNotFound(ActivityId),
    /// No activity whose name matches case-insensitively.
    ActivityNameNotFound(String),
    OrganizationNotFound(OrganizationId),
    BuildingNotFound(BuildingId),
    /// Query text or limit rejected before reaching storage.
    InvalidQuery(String),
    /// Nearby query violates the radius-or-rectangle contract.
    Proximity(ProximityError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ActivityNotFound(_)
            | Self::ActivityNameNotFound(_)
            | Self::OrganizationNotFound(_)
            | Self::BuildingNotFound(_) => ErrorKind::NotFound,
            Self::InvalidQuery(_) | Self::Proximity(_) => ErrorKind::Validation,
            Self::Repo(_) => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActivityNotFound(id) => write!(f, "activity not found: {id}"),
            Self::ActivityNameNotFound(name) => write!(f, "activity not found: `{name}`"),
            Self::OrganizationNotFound(id) => write!(f, "organization not found: {id}"),
            Self::BuildingNotFound(id) => write!(f, "building not found: {id}"),
            Self::InvalidQuery(message) => write!(f, "invalid query: {message}"),
            Self::Proximity(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Proximity(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ProximityError> for ServiceError {
    fn from(value: ProximityError) -> Self {
        Self::Proximity(value)
    }
}

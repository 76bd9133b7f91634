use crate::client::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Project IDs must not be empty")]
pub struct InvalidProjectId;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("One of `description` or `project_id` must be provided to look up a cloud project")]
    InvalidInput,
    #[error("Error enumerating cloud projects via `GET {endpoint}`")]
    Enumerate {
        endpoint: String,
        #[source]
        source: TransportError,
    },
    #[error("Error fetching cloud project `{project_id}` via `GET {endpoint}`")]
    RemoteFetch {
        endpoint: String,
        project_id: String,
        #[source]
        source: TransportError,
    },
    #[error("No cloud project with description `{description}` found in this account")]
    NotFound { description: String },
}

impl ResolveError {
    /// Stable, machine readable name of the failure.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            ResolveError::InvalidInput => "InvalidInput",
            ResolveError::Enumerate { .. } => "EnumerationFailed",
            ResolveError::RemoteFetch { .. } => "RemoteFetchFailed",
            ResolveError::NotFound { .. } => "ProjectNotFound",
        }
    }
}

pub mod error;
mod identifier;
pub mod project;

pub use error::{InvalidProjectId, ResolveError};
pub use identifier::ProjectId;
pub use project::{CloudProject, SearchCriteria, resolve};

use crate::client::TransportError;

/// Read-only view of the `/cloud/project` part of the OVH account api.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CloudProjectApi: Send + Sync {
    /// All project ids visible to the authenticated account, in the order the
    /// service returns them.
    async fn list_project_ids(&self) -> Result<Vec<ProjectId>, TransportError>;

    /// Full record of a single project.
    async fn get_project(&self, project_id: &ProjectId) -> Result<CloudProject, TransportError>;
}

/// Path of the project enumeration endpoint, relative to the api root.
pub const LIST_PROJECTS_ENDPOINT: &str = "/cloud/project";

use serde::{Deserialize, Deserializer};
use typed_builder::TypedBuilder;

use crate::service::{CloudProjectApi, LIST_PROJECTS_ENDPOINT, ProjectId, ResolveError};

/// A public cloud project as returned by `GET /cloud/project/{serviceName}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CloudProject {
    /// ID of the project.
    pub project_id: String,
    /// Name of the project. Older projects may not have one.
    #[serde(
        rename = "projectName",
        default,
        deserialize_with = "deserialize_null_as_empty"
    )]
    pub project_name: String,
    /// Free-form description set by the account owner.
    #[serde(default)]
    pub description: Option<String>,
    /// Access tier of the account on this project, e.g. `full` or `restricted`.
    pub access: String,
    /// Lifecycle state, e.g. `ok`, `suspended` or `deleting`.
    pub status: String,
}

fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keys a cloud project can be looked up by.
///
/// Empty strings are treated as if the key was not given at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct SearchCriteria {
    #[builder(default, setter(strip_option, into))]
    description: Option<String>,
    #[builder(default, setter(strip_option, into))]
    project_id: Option<String>,
}

impl SearchCriteria {
    #[must_use]
    pub fn new(description: Option<String>, project_id: Option<String>) -> Self {
        Self {
            description,
            project_id,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Resolve exactly one cloud project.
///
/// If a project id is given it is trusted as is: a single detail fetch is
/// issued and its result is returned, even if a description is given as well.
/// Otherwise all projects of the account are listed and fetched one after
/// another until the first one whose description equals the requested one.
pub async fn resolve<A>(api: &A, criteria: &SearchCriteria) -> Result<CloudProject, ResolveError>
where
    A: CloudProjectApi + ?Sized,
{
    let description = criteria.description();

    let (candidates, accept_first) = match criteria.project_id() {
        Some(project_id) => {
            let project_id =
                ProjectId::try_new(project_id).map_err(|_| ResolveError::InvalidInput)?;
            (vec![project_id], true)
        }
        None if description.is_some() => {
            tracing::debug!(endpoint = LIST_PROJECTS_ENDPOINT, "GET cloud projects");
            let project_ids = api
                .list_project_ids()
                .await
                .map_err(|source| ResolveError::Enumerate {
                    endpoint: LIST_PROJECTS_ENDPOINT.to_string(),
                    source,
                })?;
            (project_ids, false)
        }
        None => return Err(ResolveError::InvalidInput),
    };

    for project_id in candidates {
        let endpoint = project_id.endpoint();
        tracing::debug!(%endpoint, "GET cloud project");

        let project = api
            .get_project(&project_id)
            .await
            .map_err(|source| ResolveError::RemoteFetch {
                endpoint,
                project_id: project_id.to_string(),
                source,
            })?;

        let found = accept_first
            || description.is_some_and(|d| project.description.as_deref() == Some(d));
        if found {
            return Ok(project);
        }
    }

    Err(ResolveError::NotFound {
        description: description.unwrap_or_default().to_string(),
    })
}

//! The `ovh_cloud_project` data source.
//!
//! Looks up a single public cloud project by its id or by its description and
//! exposes the project's fields to the host.
use serde::{Deserialize, Serialize};

use crate::{
    api::ErrorModel,
    service::{CloudProject, CloudProjectApi, SearchCriteria, resolve},
};

pub const DATA_SOURCE_NAME: &str = "ovh_cloud_project";

/// User supplied arguments of the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloudProjectDataSourceConfig {
    /// Description of the project to look up. Must match exactly.
    #[serde(default)]
    pub description: Option<String>,
    /// Id of the project to look up. Takes precedence over `description`.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl From<CloudProjectDataSourceConfig> for SearchCriteria {
    fn from(config: CloudProjectDataSourceConfig) -> Self {
        SearchCriteria::new(config.description, config.project_id)
    }
}

/// State of the data source after a successful read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudProjectDataSourceState {
    /// Identity of the read entity, always equal to `project_id`.
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub description: Option<String>,
    pub access: String,
    pub status: String,
}

impl From<CloudProject> for CloudProjectDataSourceState {
    fn from(project: CloudProject) -> Self {
        let CloudProject {
            project_id,
            project_name,
            description,
            access,
            status,
        } = project;

        Self {
            id: project_id.clone(),
            project_id,
            project_name,
            description,
            access,
            status,
        }
    }
}

/// Read the data source.
pub async fn read<A>(
    api: &A,
    config: CloudProjectDataSourceConfig,
) -> Result<CloudProjectDataSourceState, ErrorModel>
where
    A: CloudProjectApi + ?Sized,
{
    let criteria = SearchCriteria::from(config);
    let project = resolve(api, &criteria).await?;
    let state = CloudProjectDataSourceState::from(project);

    tracing::debug!(
        project_id = %state.project_id,
        project_name = %state.project_name,
        description = ?state.description,
        access = %state.access,
        status = %state.status,
        "Resolved cloud project"
    );

    Ok(state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttributeMode {
    /// Set by the user only.
    Optional,
    /// Set by the user, or filled in by the read if left empty.
    OptionalComputed,
    /// Filled in by the read only.
    Computed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub r#type: &'static str,
    pub mode: AttributeMode,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceSchema {
    pub name: &'static str,
    pub attributes: Vec<Attribute>,
}

/// Declared attributes of the data source.
#[must_use]
pub fn schema() -> DataSourceSchema {
    let attribute = |name: &'static str, mode: AttributeMode, description: &'static str| Attribute {
        name,
        r#type: "string",
        mode,
        description,
    };

    DataSourceSchema {
        name: DATA_SOURCE_NAME,
        attributes: vec![
            attribute(
                "description",
                AttributeMode::Optional,
                "Description of the project. Either description or project_id identifies the project.",
            ),
            attribute(
                "project_id",
                AttributeMode::OptionalComputed,
                "Id of the project. Either description or project_id identifies the project.",
            ),
            attribute(
                "project_name",
                AttributeMode::Computed,
                "Name of the project.",
            ),
            attribute(
                "access",
                AttributeMode::Computed,
                "Access tier of the account on the project.",
            ),
            attribute("status", AttributeMode::Computed, "Status of the project."),
        ],
    }
}

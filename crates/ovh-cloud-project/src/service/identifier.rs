use std::{ops::Deref, str::FromStr};

use crate::service::error::InvalidProjectId;

#[derive(Debug, serde::Serialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProjectId(String);

impl<'de> serde::Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<ProjectId, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProjectId::try_new(s).map_err(serde::de::Error::custom)
    }
}

impl From<ProjectId> for String {
    fn from(ident: ProjectId) -> Self {
        ident.0
    }
}

impl ProjectId {
    /// Create a new project id from a string.
    ///
    /// OVH project ids are opaque to this crate, so any non-empty string is
    /// accepted. The id is path-escaped when it is placed in a request url.
    ///
    /// # Errors
    /// Returns an error if the provided string is empty.
    pub fn try_new(id: impl Into<String>) -> Result<Self, InvalidProjectId> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidProjectId);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the detail endpoint of this project, relative to the api root.
    ///
    /// Every byte outside the unreserved set is percent-encoded, including
    /// sub-delimiters such as `:@&=+$` which are valid unescaped in a path
    /// segment. The api decodes both forms to the same id.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("/cloud/project/{}", urlencoding::encode(&self.0))
    }
}

impl Deref for ProjectId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = InvalidProjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectId::try_new(s)
    }
}

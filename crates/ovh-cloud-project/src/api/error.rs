use std::{
    error::Error as StdError,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{ConfigError, service::ResolveError};

fn error_chain_fmt(e: &dyn StdError, f: &mut Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "{e}")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}

fn error_chain_vec(e: &dyn StdError) -> Vec<String> {
    let mut details = Vec::new();
    let mut current = e.source();
    while let Some(cause) = current {
        details.push(cause.to_string());
        current = cause.source();
    }
    details
}

/// JSON wrapper for errors reported to the host.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorModel,
}

impl From<ErrorModel> for ErrorResponse {
    fn from(value: ErrorModel) -> Self {
        ErrorResponse { error: value }
    }
}

/// Error payload reported to the host when a data source read fails.
#[derive(Default, Debug, TypedBuilder, Serialize, Deserialize)]
pub struct ErrorModel {
    /// Human-readable error message
    #[builder(setter(into))]
    pub message: String,
    /// Internal type definition of the error
    #[builder(setter(into))]
    pub r#type: String,
    /// Messages of the underlying causes, outermost first
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    #[builder(default)]
    pub stack: Vec<String>,
    #[serde(skip)]
    #[builder(default)]
    pub source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl StdError for ErrorModel {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl Display for ErrorModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {}", self.r#type, self.message)?;

        if !self.stack.is_empty() {
            writeln!(f, "Stack:")?;
            for detail in &self.stack {
                writeln!(f, "  {detail}")?;
            }
        }

        if let Some(source) = self.source.as_ref() {
            writeln!(f, "Caused by:")?;
            error_chain_fmt(&**source, f)?;
        }

        Ok(())
    }
}

impl From<ResolveError> for ErrorModel {
    fn from(err: ResolveError) -> Self {
        ErrorModel::builder()
            .message(err.to_string())
            .r#type(err.error_type())
            .stack(error_chain_vec(&err))
            .source(Some(Box::new(err) as Box<dyn StdError + Send + Sync>))
            .build()
    }
}

impl From<ConfigError> for ErrorModel {
    fn from(err: ConfigError) -> Self {
        ErrorModel::builder()
            .message(err.to_string())
            .r#type("ConfigurationError")
            .stack(error_chain_vec(&err))
            .source(Some(Box::new(err) as Box<dyn StdError + Send + Sync>))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::TransportError;

    #[test]
    fn test_invalid_input_model() {
        let model = ErrorModel::from(ResolveError::InvalidInput);
        assert_eq!(model.r#type, "InvalidInput");
        assert!(model.message.contains("description"));
        assert!(model.message.contains("project_id"));
        assert!(model.stack.is_empty());
    }

    #[test]
    fn test_fetch_error_model_carries_cause() {
        let err = ResolveError::RemoteFetch {
            endpoint: "/cloud/project/p2".to_string(),
            project_id: "p2".to_string(),
            source: TransportError::Api {
                status: reqwest::StatusCode::NOT_FOUND,
                message: "This service does not exist".to_string(),
                query_id: None,
            },
        };
        let model = ErrorModel::from(err);
        assert_eq!(model.r#type, "RemoteFetchFailed");
        assert_eq!(
            model.message,
            "Error fetching cloud project `p2` via `GET /cloud/project/p2`"
        );
        assert_eq!(
            model.stack,
            vec!["OVH api returned 404 Not Found: This service does not exist".to_string()]
        );
        assert!(model.to_string().contains("Caused by:"));
    }

    #[test]
    fn test_error_response_json() {
        let model = ErrorModel::from(ResolveError::NotFound {
            description: "prod-eu".to_string(),
        });
        let json = serde_json::to_value(ErrorResponse::from(model)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": {
                    "message": "No cloud project with description `prod-eu` found in this account",
                    "type": "ProjectNotFound"
                }
            })
        );
    }
}

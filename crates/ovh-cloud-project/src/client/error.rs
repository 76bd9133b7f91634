use reqwest::StatusCode;
use serde::Deserialize;

/// Failure of a single call against the OVH api.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid request url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP request to `{url}` failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("OVH api returned {status}: {message}{}", query_id_suffix(.query_id.as_deref()))]
    Api {
        status: StatusCode,
        message: String,
        query_id: Option<String>,
    },
    #[error("Failed to decode response of `{url}`")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

fn query_id_suffix(query_id: Option<&str>) -> String {
    query_id.map_or_else(String::new, |id| format!(" (query id: {id})"))
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl TransportError {
    /// Build the error for a non-success response.
    ///
    /// OVH error bodies are `{"message": "..."}`. Anything else is passed
    /// through as the message verbatim.
    pub(crate) fn from_response(status: StatusCode, body: &str, query_id: Option<String>) -> Self {
        let message = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(ApiErrorBody { message }) => message,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => body.trim().to_string(),
        };

        TransportError::Api {
            status,
            message,
            query_id,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Api { status, .. } => Some(*status),
            TransportError::Http { source, .. } => source.status(),
            TransportError::InvalidUrl { .. } | TransportError::Decode { .. } => None,
        }
    }
}

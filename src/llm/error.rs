use async_openai::error::{ApiError, OpenAIError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Network,
    Timeout,
    Authentication,
    RateLimited,
    Api,
    MalformedResponse,
    InvalidRequest,
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::Api => "api",
            Self::MalformedResponse => "malformed_response",
            Self::InvalidRequest => "invalid_request",
        };
        f.write_str(name)
    }
}

/// A failed completion call. Displays as the raw upstream message.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    pub message: String,
}

impl UpstreamError {
    pub fn new(kind: UpstreamErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::MalformedResponse, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::InvalidRequest, message)
    }
}

impl From<OpenAIError> for UpstreamError {
    fn from(err: OpenAIError) -> Self {
        let kind = match &err {
            OpenAIError::Reqwest(e) if e.is_timeout() => UpstreamErrorKind::Timeout,
            OpenAIError::Reqwest(_) => UpstreamErrorKind::Network,
            OpenAIError::ApiError(api) => classify_api_error(api),
            OpenAIError::JSONDeserialize(..) => UpstreamErrorKind::MalformedResponse,
            OpenAIError::InvalidArgument(_) => UpstreamErrorKind::InvalidRequest,
            _ => UpstreamErrorKind::Api,
        };

        Self::new(kind, err.to_string())
    }
}

fn classify_api_error(api: &ApiError) -> UpstreamErrorKind {
    let code = api.code.as_ref().map(|c| c.to_string()).unwrap_or_default();
    let error_type = api.r#type.as_deref().unwrap_or_default();

    if code.contains("invalid_api_key") || error_type.contains("authentication") {
        UpstreamErrorKind::Authentication
    } else if code.contains("rate_limit")
        || code.contains("insufficient_quota")
        || error_type.contains("insufficient_quota")
    {
        UpstreamErrorKind::RateLimited
    } else {
        UpstreamErrorKind::Api
    }
}

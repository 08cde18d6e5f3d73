use thiserror::Error;

/// Why a weather lookup produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request never got a response: DNS, refused connection, timeout, broken body.
    #[error("transport error: {detail}")]
    Transport { detail: String },

    /// Provider answered with a non-success status (unknown city, bad key, rate limit).
    #[error("provider returned {code}: {message}")]
    Provider { code: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("unexpected response: {detail}")]
    Parse { detail: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl FetchError {
    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        FetchError::Transport {
            detail: err.to_string(),
        }
    }

    pub(crate) fn parse(detail: impl Into<String>) -> Self {
        FetchError::Parse {
            detail: detail.into(),
        }
    }

    /// Only transport failures may succeed when repeated unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    /// HTTP status for provider errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Provider { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_is_transient() {
        assert!(FetchError::transport("dns failure").is_transient());
        assert!(!FetchError::parse("missing field").is_transient());
        let throttled = FetchError::Provider {
            code: 429,
            message: "slow down".into(),
        };
        assert!(!throttled.is_transient());
    }

    #[test]
    fn provider_error_exposes_status() {
        let err = FetchError::Provider {
            code: 404,
            message: "city not found".into(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "provider returned 404: city not found");
        assert_eq!(FetchError::parse("x").status_code(), None);
    }
}

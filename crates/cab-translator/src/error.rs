/// Failure of a single call to a remote service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// Transport level: DNS, connect, TLS, timeout
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    /// Non-success status from the remote service
    #[error("Service rejected request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Success status but the body is not what we expect
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unreachable,
    Rejected,
    Malformed,
}

impl ServiceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ServiceError::Unreachable(_) => FailureKind::Unreachable,
            ServiceError::Rejected { .. } => FailureKind::Rejected,
            ServiceError::Malformed(_) => FailureKind::Malformed,
        }
    }

    pub(crate) fn missing_key(service: &str) -> Self {
        ServiceError::Rejected {
            status: 401,
            body: format!("No API key configured for {service}"),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Unreachable(err.to_string())
    }
}

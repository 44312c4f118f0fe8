use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider request failed{}: {message}", status_suffix(.status))]
    ProviderRequest {
        /// HTTP status of the provider response, absent on transport failures.
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}

impl GatewayError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// A non-2xx provider response with its status code preserved.
    pub fn provider_status(status: u16, msg: impl Into<String>) -> Self {
        Self::ProviderRequest {
            status: Some(status),
            message: msg.into(),
        }
    }

    /// A transport-level failure with no HTTP status available.
    pub fn provider_transport(msg: impl Into<String>) -> Self {
        Self::ProviderRequest {
            status: None,
            message: msg.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderRequest { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_provider_request(&self) -> bool {
        matches!(self, Self::ProviderRequest { .. })
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Error types for the metadata translation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Provider credentials missing or unusable (server-side misconfiguration)
    Configuration(String),
    /// Caller supplied unusable input (empty field set, no target language)
    InvalidRequest(String),
    /// Provider answered with an unexpected shape or translation count
    ProviderResponse(String),
    /// Network failure or non-2xx provider status
    ProviderTransport(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            TranslateError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            TranslateError::ProviderResponse(msg) => write!(f, "Provider response error: {}", msg),
            TranslateError::ProviderTransport(msg) => {
                write!(f, "Provider transport error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::ProviderTransport(err.to_string())
    }
}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;

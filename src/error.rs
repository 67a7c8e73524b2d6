//! Error taxonomy for a single command check.
//!
//! Every failure is terminal for the request that produced it. The UI and the
//! one-shot CLI both turn a [`CheckError`] into text with
//! [`CheckError::user_message`].

use thiserror::Error;

/// Rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("command is empty")]
    EmptyCommand,
    #[error("no API key configured")]
    MissingApiKey,
}

/// Failure reported by the completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("quota or rate limit exceeded: {0}")]
    Quota(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Api(String),
    #[error("provider returned an empty completion")]
    EmptyResponse,
}

/// Raw completion could not be reduced to a valid analysis.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found")]
    NoJsonObject,
    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("missing or invalid field: {0}")]
    InvalidField(&'static str),
}

impl ParseError {
    /// Short stable name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::NoJsonObject => "no_json_object",
            ParseError::MalformedJson(_) => "malformed_json",
            ParseError::InvalidField(_) => "invalid_field",
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CheckError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            CheckError::Validation(ValidationError::EmptyCommand) => {
                "Please enter a command to analyze.".to_string()
            }
            CheckError::Validation(ValidationError::MissingApiKey) => {
                "No API key configured. Set OPENAI_API_KEY or add a key in settings (Ctrl+S)."
                    .to_string()
            }
            CheckError::Provider(e) => format!("Failed to reach the AI service: {}", e),
            CheckError::Parse(ParseError::MalformedJson(_)) => {
                "The AI returned a response that was not valid JSON. Please try again.".to_string()
            }
            CheckError::Parse(e) => format!("Failed to analyze command: {}", e),
        }
    }
}

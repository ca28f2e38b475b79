use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Server misconfiguration")]
    MissingCredential,

    #[error("Missing 'prompt' in request body")]
    MissingPrompt,

    #[error("Prompt too long (max {max} chars)")]
    PromptTooLong { max: usize },

    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("AI returned empty response")]
    EmptyCompletion,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for errors caused by the caller's request rather than the relay or upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MethodNotAllowed | Self::MissingPrompt | Self::PromptTooLong { .. }
        )
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected model response: {0}")]
    UpstreamResponseShape(String),

    #[error("Failed to parse model response: {0}")]
    ResponseParse(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Stable tag for logs and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::NotFound(_) => "not_found",
            Error::UpstreamResponseShape(_) => "upstream_response_shape",
            Error::ResponseParse(_) => "response_parse",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
            Error::Inference(_) => "inference",
            Error::Storage(_) => "storage",
            Error::Http(_) => "http",
            Error::External(_) => "external",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

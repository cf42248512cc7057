use thiserror::Error;

use crate::session::Action;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("ticket #{0} not found")]
    TicketNotFound(u64),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid rating {0}, expected 1-5")]
    InvalidRating(u8),

    #[error("response is empty")]
    EmptyResponse,

    #[error("{0} is already in progress")]
    ActionPending(Action),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeskError {
    pub fn is_network(&self) -> bool {
        matches!(self, DeskError::NetworkFailure(_))
    }
}

impl From<reqwest::Error> for DeskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return DeskError::NetworkFailure(format!("request timed out: {err}"));
        }
        DeskError::NetworkFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Invalid build configuration: {0}")]
    InvalidConfig(String),

    #[error("Children decode error: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("Children payload is not text or a list: {0}")]
    UnsupportedPayload(&'static str),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One failed rung of the sanitization ladder.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("{strategy}: {source}")]
    Json {
        strategy: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{strategy}: decoded {found} instead of a list")]
    NotAList {
        strategy: &'static str,
        found: &'static str,
    },
}

/// Every sanitization strategy failed for a children payload.
#[derive(Error, Debug)]
#[error("no sanitization strategy produced a list ({})", render_attempts(.attempts))]
pub struct DecodeError {
    pub attempts: Vec<StrategyError>,
}

fn render_attempts(attempts: &[StrategyError]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

use thiserror::Error;

use common::errors::ConfigError;

#[derive(Debug, Error)]
pub enum ParleyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read analysis request: {0}")]
    Input(#[from] std::io::Error),
    #[error("invalid analysis request: {0}")]
    Request(#[source] serde_json::Error),
    #[error("failed to write analysis report: {0}")]
    Output(#[source] serde_json::Error),
}

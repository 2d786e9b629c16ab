//! Error type shared by the simulation and configuration layers

use thiserror::Error;

use crate::simulation::states::BodyId;

#[derive(Debug, Error)]
pub enum SimError {
    /// Body creation with a mass that is zero, negative or not finite
    #[error("body mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    #[error("scenario contains no bodies")]
    EmptyScenario,

    #[error("cannot merge an empty collision group")]
    EmptyGroup,

    #[error("no live body with id {0}")]
    UnknownBody(BodyId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

use thiserror::Error;

/// Contract violations and loading failures.
///
/// Game outcomes such as an illegal cut or an exhausted budget are not errors;
/// they are reported through [`crate::game::SubmitOutcome`].
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Polygon has {count} vertices, at least {minimum} required")]
    InsufficientVertices { count: usize, minimum: usize },

    #[error("Territory boundary edges cross each other")]
    SelfIntersecting,

    #[error("Territory boundary encloses no area")]
    ZeroArea,

    #[error("Capital lies outside the territory boundary")]
    CapitalOutsideTerritory,

    #[error("Candidate line has zero length")]
    DegenerateLine,

    #[error("Coordinate is not a finite number")]
    NonFiniteCoordinate,

    #[error("Invalid view transform: {0}")]
    InvalidTransform(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

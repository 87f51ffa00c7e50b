use thiserror::Error;

#[derive(Error, Debug)]
pub enum JetError {
    #[error("Solver diverged at iteration {iteration}: {message}")]
    SolverDiverged { iteration: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Grid index out of bounds: k={k}, j={j}, i={i}")]
    GridOutOfBounds { k: usize, j: usize, i: usize },

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type JetResult<T> = Result<T, JetError>;

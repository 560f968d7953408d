use thiserror::Error;

use crate::record::GameHandle;

/// Misuse of the manager surface. Rejected moves are not errors here; they
/// come back as [`crate::MoveOutcome`] values.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("no active game {0}")]
    UnknownGame(GameHandle),

    #[error("active game limit of {0} reached")]
    CapacityReached(usize),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

use chess_rules::{GameStatus, RulesError};
use serde::{Deserialize, Serialize};

/// Result of a move submission as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    Accepted {
        /// Status for the side now on move
        new_status: GameStatus,
        annotation: String,
    },
    /// Empty origin square, or a destination the piece cannot legally reach
    RejectedIllegalMove,
    RejectedNotYourTurn,
    RejectedOutOfBounds,
    /// The game already ended
    RejectedGameOver,
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

impl From<&RulesError> for MoveOutcome {
    fn from(err: &RulesError) -> Self {
        match err {
            RulesError::OutOfBounds { .. } | RulesError::InvalidSquare(_) => {
                MoveOutcome::RejectedOutOfBounds
            }
            RulesError::WrongTurn { .. } => MoveOutcome::RejectedNotYourTurn,
            RulesError::GameOver(_) => MoveOutcome::RejectedGameOver,
            RulesError::EmptySquare(_) | RulesError::IllegalMove { .. } | RulesError::InvalidFen(_) => {
                MoveOutcome::RejectedIllegalMove
            }
        }
    }
}

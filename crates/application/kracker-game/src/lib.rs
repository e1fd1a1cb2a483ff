//! KrackerXR campaign rules
//!
//! Everything the puzzle pages decide, minus the pages:
//! - `answer` - answer normalization and matching
//! - `puzzle` - Caesar, fixed-code and riddle puzzles
//! - `gate` - submission flow with the mismatch / override second chances
//! - `campaign` - typed campaign document (stages, mission copy)
//! - `progress` - linear stage progression per player
//! - `leaderboard` - ranking players by stages and time
//!
//! ```text
//!   Attempt ──► SubmissionGate ──► Puzzle::check ──► Solved ──► Progress::complete
//!                   │   ▲                                           │
//!                   ▼   │ confirm / override                        ▼
//!            ConfirmMismatch / AwaitingOverride               Leaderboard
//! ```

pub mod answer;
pub mod campaign;
pub mod gate;
pub mod leaderboard;
pub mod progress;
pub mod puzzle;

pub use campaign::{Campaign, MissionContent, Stage};
pub use gate::{GateState, SubmissionGate};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use progress::{Completion, Progress};
pub use puzzle::{Attempt, Outcome, Puzzle};

/// Result type for kracker-game operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kracker-game
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid campaign document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    #[error("Duplicate stage id: {0}")]
    DuplicateStage(String),

    #[error("Stage {stage} is locked, finish {next} first")]
    StageLocked { stage: String, next: String },

    #[error("Stage already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

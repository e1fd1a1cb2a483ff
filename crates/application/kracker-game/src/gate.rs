//! Submission gate
//!
//! Two second chances sit between a player and a wrong answer:
//! - the wheel shows a different shift than the puzzle expects: ask once
//!   whether to submit anyway, then judge the text alone
//! - the answer is wrong and the stage carries an override literal: one
//!   free-text re-entry compared against it
//!
//! ```text
//!   Idle / Failed ──submit──► wheel mismatch? ──yes, first time──► ConfirmMismatch
//!                                  │ no                                │ confirm
//!                                  ▼                                   ▼
//!                            judge answer ◄────────────────────────────┘
//!                             │         │
//!                       right ▼         ▼ wrong
//!                          Solved    override left? ──yes──► AwaitingOverride
//!                                       │ no                     │ submit_override
//!                                       ▼                        ▼
//!                                     Failed              Solved / Failed
//!
//!   cancel: ConfirmMismatch / AwaitingOverride ──► Idle
//! ```

use crate::campaign::Stage;
use crate::puzzle::{Attempt, Outcome, Puzzle};
use crate::{answer, Error, Result};
use kracker_cipher::Shift;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    /// Waiting for the player to confirm submitting with a mismatched wheel
    ConfirmMismatch { expected: Shift, actual: Shift },
    /// Waiting for the single override re-entry
    AwaitingOverride,
    Solved,
    /// Wrong answer; a fresh submit is allowed
    Failed,
}

impl GateState {
    pub fn name(&self) -> &'static str {
        match self {
            GateState::Idle => "idle",
            GateState::ConfirmMismatch { .. } => "confirming shift mismatch",
            GateState::AwaitingOverride => "awaiting override",
            GateState::Solved => "solved",
            GateState::Failed => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            GateState::ConfirmMismatch { .. } | GateState::AwaitingOverride
        )
    }
}

/// Per-stage submission flow
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    stage_id: String,
    puzzle: Puzzle,
    override_answer: Option<String>,
    state: GateState,
    pending: Option<Attempt>,
    mismatch_confirmed: bool,
    override_used: bool,
}

impl SubmissionGate {
    pub fn new(stage: &Stage) -> Self {
        Self {
            stage_id: stage.id.clone(),
            puzzle: stage.puzzle.clone(),
            override_answer: stage.override_answer.clone(),
            state: GateState::Idle,
            pending: None,
            mismatch_confirmed: false,
            override_used: false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn stage_id(&self) -> &str {
        &self.stage_id
    }

    pub fn is_solved(&self) -> bool {
        self.state == GateState::Solved
    }

    pub fn override_available(&self) -> bool {
        self.override_answer.is_some() && !self.override_used
    }

    pub fn submit(&mut self, attempt: Attempt) -> Result<GateState> {
        if !matches!(self.state, GateState::Idle | GateState::Failed) {
            return Err(self.invalid("submit"));
        }

        match self.puzzle.check(&attempt) {
            Outcome::ShiftMismatch { expected, actual } if !self.mismatch_confirmed => {
                tracing::debug!(
                    stage = %self.stage_id,
                    expected = %expected,
                    actual = %actual,
                    "shift mismatch, asking for confirmation"
                );
                self.pending = Some(attempt);
                self.state = GateState::ConfirmMismatch { expected, actual };
            }
            Outcome::ShiftMismatch { .. } => {
                let correct = self.puzzle.check_answer(&attempt.answer);
                self.judge(correct);
            }
            Outcome::Correct => self.judge(true),
            Outcome::Incorrect => self.judge(false),
        }

        Ok(self.state)
    }

    /// Submit the pending answer despite the wheel mismatch.
    pub fn confirm_mismatch(&mut self) -> Result<GateState> {
        if !matches!(self.state, GateState::ConfirmMismatch { .. }) {
            return Err(self.invalid("confirm a mismatch"));
        }

        self.mismatch_confirmed = true;
        let attempt = self.pending.take().unwrap_or_default();
        let correct = self.puzzle.check_answer(&attempt.answer);
        self.judge(correct);
        Ok(self.state)
    }

    pub fn submit_override(&mut self, text: &str) -> Result<GateState> {
        if self.state != GateState::AwaitingOverride {
            return Err(self.invalid("submit an override"));
        }

        self.override_used = true;
        let accepted = self
            .override_answer
            .as_deref()
            .map(|expected| answer::matches(text, expected))
            .unwrap_or(false);

        tracing::info!(stage = %self.stage_id, accepted, "override submitted");
        self.state = if accepted {
            GateState::Solved
        } else {
            GateState::Failed
        };
        Ok(self.state)
    }

    /// Back out of a pending question.
    pub fn cancel(&mut self) -> Result<GateState> {
        if !self.state.is_pending() {
            return Err(self.invalid("cancel"));
        }
        self.pending = None;
        self.state = GateState::Idle;
        Ok(self.state)
    }

    fn judge(&mut self, correct: bool) {
        self.state = if correct {
            tracing::info!(stage = %self.stage_id, "stage solved");
            GateState::Solved
        } else if self.override_available() {
            GateState::AwaitingOverride
        } else {
            GateState::Failed
        };
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }
}

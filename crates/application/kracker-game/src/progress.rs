//! Player progress
//!
//! Stages unlock strictly in campaign order. The stopwatch runs from
//! `started_at` until the final stage is completed.

use crate::campaign::{Campaign, Stage};
use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub stage_id: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub player: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: Vec<Completion>,
}

impl Progress {
    pub fn start(player: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            player: player.into(),
            started_at: at,
            completed: Vec::new(),
        }
    }

    /// Mark `stage_id` done. Only the next stage in order can be completed.
    /// Returns the number of stages completed so far.
    pub fn complete(
        &mut self,
        campaign: &Campaign,
        stage_id: &str,
        at: DateTime<Utc>,
    ) -> Result<usize> {
        let position = campaign
            .position(stage_id)
            .ok_or_else(|| Error::UnknownStage(stage_id.to_string()))?;

        let done = self.stages_completed(campaign);
        if position < done {
            return Err(Error::AlreadyCompleted(stage_id.to_string()));
        }
        if position > done {
            let next = campaign
                .stages
                .get(done)
                .map(|s| s.id.clone())
                .unwrap_or_default();
            return Err(Error::StageLocked {
                stage: stage_id.to_string(),
                next,
            });
        }

        self.completed.truncate(done);
        self.completed.push(Completion {
            stage_id: stage_id.to_string(),
            at,
        });
        tracing::info!(
            player = %self.player,
            stage = stage_id,
            done = done + 1,
            total = campaign.len(),
            "stage completed"
        );
        Ok(done + 1)
    }

    /// Completions that line up with the campaign's stage order.
    ///
    /// Progress read back from disk is only trusted as far as it follows
    /// the campaign; anything after the first out-of-order entry is ignored.
    pub fn stages_completed(&self, campaign: &Campaign) -> usize {
        self.completed
            .iter()
            .zip(campaign.stages.iter())
            .take_while(|(done, stage)| done.stage_id == stage.id)
            .count()
    }

    /// The stage the player is working on, `None` once finished
    pub fn current_stage<'c>(&self, campaign: &'c Campaign) -> Option<&'c Stage> {
        campaign.stages.get(self.stages_completed(campaign))
    }

    pub fn is_finished(&self, campaign: &Campaign) -> bool {
        self.stages_completed(campaign) >= campaign.len()
    }

    /// Time on the clock: up to `now`, or up to the last stage once finished
    pub fn elapsed(&self, campaign: &Campaign, now: DateTime<Utc>) -> Duration {
        let done = self.stages_completed(campaign);
        let last = done.checked_sub(1).and_then(|i| self.completed.get(i));
        let end = match last {
            Some(last) if done >= campaign.len() => last.at,
            _ => now,
        };
        (end - self.started_at).max(Duration::zero())
    }
}

/// Stopwatch display, `HH:MM:SS`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

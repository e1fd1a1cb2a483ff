//! Leaderboard
//!
//! More stages beats fewer; among equals the faster clock wins. Players
//! tied on both share a rank (1, 2, 2, 4).

use crate::campaign::Campaign;
use crate::progress::{format_elapsed, Progress};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player: String,
    pub stages_completed: usize,
    pub elapsed_secs: i64,
    pub finished: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn rank(progresses: &[Progress], campaign: &Campaign, now: DateTime<Utc>) -> Self {
        let mut entries: Vec<LeaderboardEntry> = progresses
            .iter()
            .map(|p| LeaderboardEntry {
                rank: 0,
                player: p.player.clone(),
                stages_completed: p.stages_completed(campaign),
                elapsed_secs: p.elapsed(campaign, now).num_seconds(),
                finished: p.is_finished(campaign),
            })
            .collect();

        entries.sort_by(|a, b| {
            b.stages_completed
                .cmp(&a.stages_completed)
                .then(a.elapsed_secs.cmp(&b.elapsed_secs))
                .then_with(|| a.player.cmp(&b.player))
        });

        let mut previous: Option<(usize, i64, usize)> = None;
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = match previous {
                Some((stages, secs, rank))
                    if stages == entry.stages_completed && secs == entry.elapsed_secs =>
                {
                    rank
                }
                _ => i + 1,
            };
            previous = Some((entry.stages_completed, entry.elapsed_secs, entry.rank));
        }

        Self { entries }
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn position_of(&self, player: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.player == player)
    }

    /// Render as an ASCII table
    pub fn render(&self, total_stages: usize) -> String {
        let mut lines = Vec::new();
        lines.push("LEADERBOARD".to_string());
        lines.push("═".repeat(44));

        if self.entries.is_empty() {
            lines.push("  (no players yet)".to_string());
        }

        for e in &self.entries {
            let flag = if e.finished { "★" } else { " " };
            lines.push(format!(
                "{:>3}. {:<20} {:>2}/{:<2} {} {}",
                e.rank,
                truncate(&e.player, 20),
                e.stages_completed,
                total_stages,
                format_elapsed(Duration::seconds(e.elapsed_secs)),
                flag
            ));
        }

        lines.join("\n")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{MissionContent, Stage};
    use crate::puzzle::Puzzle;
    use chrono::TimeZone;

    fn campaign() -> Campaign {
        let stages = ["a", "b"]
            .iter()
            .map(|id| Stage {
                id: id.to_string(),
                title: String::new(),
                puzzle: Puzzle::Code { code: "0".into() },
                content: MissionContent::default(),
                override_answer: None,
            })
            .collect();
        Campaign::new("test", stages).unwrap()
    }

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn player(name: &str, times: &[(&str, i64)]) -> Progress {
        let campaign = campaign();
        let mut p = Progress::start(name, t(0));
        for (stage, at) in times {
            p.complete(&campaign, stage, t(*at)).unwrap();
        }
        p
    }

    #[test]
    fn test_ordering() {
        let campaign = campaign();
        let players = vec![
            player("slow", &[("a", 100), ("b", 900)]),
            player("fast", &[("a", 50), ("b", 300)]),
            player("stuck", &[("a", 10)]),
        ];
        let board = Leaderboard::rank(&players, &campaign, t(1000));
        let names: Vec<&str> = board.entries.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(names, vec!["fast", "slow", "stuck"]);
        assert_eq!(board.entries[0].elapsed_secs, 300);
        assert!(board.entries[0].finished);
        assert_eq!(board.entries[2].elapsed_secs, 1000);
        assert!(!board.entries[2].finished);
    }

    #[test]
    fn test_ties_share_rank() {
        let campaign = campaign();
        let players = vec![
            player("bo", &[("a", 10), ("b", 20)]),
            player("al", &[("a", 15), ("b", 20)]),
            player("cy", &[("a", 5), ("b", 40)]),
            player("di", &[]),
        ];
        let board = Leaderboard::rank(&players, &campaign, t(100));
        let ranks: Vec<(usize, &str)> = board
            .entries
            .iter()
            .map(|e| (e.rank, e.player.as_str()))
            .collect();
        assert_eq!(ranks, vec![(1, "al"), (1, "bo"), (3, "cy"), (4, "di")]);
    }

    #[test]
    fn test_top_and_lookup() {
        let campaign = campaign();
        let players = vec![player("x", &[("a", 1)]), player("y", &[])];
        let board = Leaderboard::rank(&players, &campaign, t(10));
        assert_eq!(board.top(1).len(), 1);
        assert_eq!(board.top(10).len(), 2);
        assert_eq!(board.position_of("y").unwrap().rank, 2);
        assert!(board.position_of("z").is_none());
    }

    #[test]
    fn test_render() {
        let campaign = campaign();
        let players = vec![player("a_very_long_player_name_indeed", &[("a", 1), ("b", 61)])];
        let out = Leaderboard::rank(&players, &campaign, t(100)).render(campaign.len());
        assert!(out.contains("2/2"));
        assert!(out.contains("00:01:01"));
        assert!(out.contains('…'));
        assert!(Leaderboard::default().render(2).contains("no players"));
    }
}

//! Shift hints
//!
//! Brute force every wheel position and rank the results by how English
//! they look (chi-squared against letter frequencies).

use crate::engine::decode;
use crate::Shift;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// English letter frequencies, A..Z
const ENGLISH_FREQ: [f64; 26] = [
    0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.020, 0.061, 0.070, 0.002,
    0.008, 0.040, 0.024, 0.067, 0.075, 0.019, 0.001, 0.060, 0.063, 0.091,
    0.028, 0.010, 0.024, 0.002, 0.020, 0.001,
];

/// One decryption attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub shift: Shift,
    pub text: String,
    /// Chi-squared distance from English; lower reads more like English
    pub score: f64,
}

/// Letter counts of a text
#[derive(Debug, Clone, Default)]
pub struct FrequencyAnalysis {
    pub counts: [usize; 26],
    pub total_letters: usize,
}

impl FrequencyAnalysis {
    pub fn analyze(text: &str) -> Self {
        let mut counts = [0usize; 26];
        let mut total_letters = 0;

        for c in text.chars().map(|c| c.to_ascii_uppercase()) {
            if c.is_ascii_uppercase() {
                counts[(c as u8 - b'A') as usize] += 1;
                total_letters += 1;
            }
        }

        Self {
            counts,
            total_letters,
        }
    }

    /// Frequency of `c` as a percentage of all letters
    pub fn frequency_percent(&self, c: char) -> f64 {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() || self.total_letters == 0 {
            return 0.0;
        }
        self.counts[(c as u8 - b'A') as usize] as f64 / self.total_letters as f64 * 100.0
    }

    /// Chi-squared test against English frequencies
    pub fn chi_squared_english(&self) -> f64 {
        if self.total_letters == 0 {
            return f64::INFINITY;
        }

        let n = self.total_letters as f64;
        ENGLISH_FREQ
            .iter()
            .zip(self.counts.iter())
            .map(|(&expected, &count)| {
                let observed = count as f64 / n;
                (observed - expected).powi(2) / expected
            })
            .sum()
    }
}

/// Decode `text` at every shift, ordered by shift
pub fn bruteforce(text: &str) -> Vec<Candidate> {
    Shift::all()
        .map(|shift| {
            let plain = decode(text, shift.into());
            let score = FrequencyAnalysis::analyze(&plain).chi_squared_english();
            Candidate {
                shift,
                text: plain,
                score,
            }
        })
        .collect()
}

/// All 26 candidates, most English-looking first
pub fn rank(text: &str) -> Vec<Candidate> {
    let mut candidates = bruteforce(text);
    candidates.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(Ordering::Equal)
            .then(a.shift.cmp(&b.shift))
    });
    candidates
}

/// Most likely shift, or `None` when there are no letters to judge by
pub fn best_guess(text: &str) -> Option<Candidate> {
    if FrequencyAnalysis::analyze(text).total_letters == 0 {
        return None;
    }
    rank(text).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::encode;

    const SENTENCE: &str = "MEET ME AT THE OLD CLOCK TOWER WHEN THE STREETLIGHTS COME ON";

    #[test]
    fn test_frequency_analysis() {
        let analysis = FrequencyAnalysis::analyze("Hello, World");
        assert_eq!(analysis.total_letters, 10);
        assert_eq!(analysis.counts[(b'L' - b'A') as usize], 3);
        assert!((analysis.frequency_percent('l') - 30.0).abs() < 1e-9);
        assert_eq!(analysis.frequency_percent('3'), 0.0);
    }

    #[test]
    fn test_bruteforce_covers_wheel() {
        let candidates = bruteforce("KHOOR");
        assert_eq!(candidates.len(), 26);
        assert_eq!(candidates[3].shift.value(), 3);
        assert_eq!(candidates[3].text, "HELLO");
        assert_eq!(candidates[0].text, "KHOOR");
    }

    #[test]
    fn test_best_guess_finds_shift() {
        for key in [1, 7, 13, 19, 25] {
            let cipher = encode(SENTENCE, key);
            let guess = best_guess(&cipher).unwrap();
            assert_eq!(guess.shift.value() as i64, key);
            assert_eq!(guess.text, SENTENCE);
        }
    }

    #[test]
    fn test_rank_is_sorted() {
        let ranked = rank(&encode(SENTENCE, 4));
        assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_best_guess_without_letters() {
        assert!(best_guess("1234 !?").is_none());
        assert!(best_guess("").is_none());
    }
}

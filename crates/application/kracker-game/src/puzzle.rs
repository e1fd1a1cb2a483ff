//! Puzzle definitions
//!
//! Three kinds of lock guard the stages: a Caesar message read off the
//! wheel, a fixed code, and a riddle answered in free text.

use crate::answer;
use kracker_cipher::{decode, Shift};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Puzzle {
    /// Decode `ciphertext` with the wheel set to `shift`
    Caesar {
        ciphertext: String,
        shift: Shift,
        /// Expected answer; defaults to the decoded ciphertext
        #[serde(default, skip_serializing_if = "Option::is_none")]
        solution: Option<String>,
    },

    /// Enter a fixed code
    Code { code: String },

    /// Free-text riddle, solved by any answer containing a keyword
    Riddle { keywords: Vec<String> },
}

/// One submission from a player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub answer: String,
    /// Wheel position at submit time, when the page has a wheel
    #[serde(default)]
    pub shift: Option<Shift>,
}

impl Attempt {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            shift: None,
        }
    }

    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = Some(shift);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// The wheel disagrees with the puzzle's shift; the answer was not judged
    ShiftMismatch { expected: Shift, actual: Shift },
}

impl Puzzle {
    pub fn kind(&self) -> &'static str {
        match self {
            Puzzle::Caesar { .. } => "caesar",
            Puzzle::Code { .. } => "code",
            Puzzle::Riddle { .. } => "riddle",
        }
    }

    /// Shift the wheel must show, for Caesar puzzles
    pub fn expected_shift(&self) -> Option<Shift> {
        match self {
            Puzzle::Caesar { shift, .. } => Some(*shift),
            _ => None,
        }
    }

    /// Text shown to the player, if the puzzle has one
    pub fn prompt(&self) -> Option<&str> {
        match self {
            Puzzle::Caesar { ciphertext, .. } => Some(ciphertext),
            _ => None,
        }
    }

    /// Full check: wheel position first, then the answer
    pub fn check(&self, attempt: &Attempt) -> Outcome {
        if let (Some(expected), Some(actual)) = (self.expected_shift(), attempt.shift) {
            if expected != actual {
                return Outcome::ShiftMismatch { expected, actual };
            }
        }

        if self.check_answer(&attempt.answer) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }

    /// Judge the answer text alone
    pub fn check_answer(&self, given: &str) -> bool {
        match self {
            Puzzle::Caesar {
                ciphertext,
                shift,
                solution,
            } => {
                let expected = solution
                    .clone()
                    .unwrap_or_else(|| decode(ciphertext, (*shift).into()));
                answer::matches(given, &expected)
            }
            Puzzle::Code { code } => answer::matches(given, code),
            Puzzle::Riddle { keywords } => answer::contains_any(given, keywords),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kracker_cipher::encode;

    fn caesar() -> Puzzle {
        Puzzle::Caesar {
            ciphertext: encode("FIND THE RED DOOR", 7),
            shift: Shift::new(7),
            solution: None,
        }
    }

    #[test]
    fn test_caesar_derived_solution() {
        let puzzle = caesar();
        assert_eq!(puzzle.check(&Attempt::new("find the red door")), Outcome::Correct);
        assert_eq!(puzzle.check(&Attempt::new("find the blue door")), Outcome::Incorrect);
    }

    #[test]
    fn test_caesar_explicit_solution() {
        let puzzle = Puzzle::Caesar {
            ciphertext: "KHOOR".into(),
            shift: Shift::new(3),
            solution: Some("greetings".into()),
        };
        assert!(puzzle.check_answer("GREETINGS"));
        assert!(!puzzle.check_answer("HELLO"));
    }

    #[test]
    fn test_caesar_shift_mismatch() {
        let attempt = Attempt::new("FIND THE RED DOOR").with_shift(Shift::new(6));
        assert_eq!(
            caesar().check(&attempt),
            Outcome::ShiftMismatch {
                expected: Shift::new(7),
                actual: Shift::new(6)
            }
        );

        let attempt = Attempt::new("FIND THE RED DOOR").with_shift(Shift::new(7));
        assert_eq!(caesar().check(&attempt), Outcome::Correct);
    }

    #[test]
    fn test_code() {
        let puzzle = Puzzle::Code { code: "4815".into() };
        assert_eq!(puzzle.check(&Attempt::new(" 4815 ")), Outcome::Correct);
        assert_eq!(puzzle.check(&Attempt::new("4816")), Outcome::Incorrect);
        // Codes ignore the wheel
        assert_eq!(
            puzzle.check(&Attempt::new("4815").with_shift(Shift::new(3))),
            Outcome::Correct
        );
    }

    #[test]
    fn test_riddle() {
        let puzzle = Puzzle::Riddle {
            keywords: vec!["echo".into()],
        };
        assert!(puzzle.check_answer("An Echo!"));
        assert!(!puzzle.check_answer("a shadow"));
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"[
            {"kind": "caesar", "ciphertext": "KHOOR", "shift": 3},
            {"kind": "code", "code": "0000"},
            {"kind": "riddle", "keywords": ["map"]}
        ]"#;
        let puzzles: Vec<Puzzle> = serde_json::from_str(json).unwrap();
        assert_eq!(puzzles[0].kind(), "caesar");
        assert_eq!(puzzles[0].prompt(), Some("KHOOR"));
        assert!(puzzles[0].check_answer("hello"));
        assert_eq!(puzzles[1].expected_shift(), None);
        assert_eq!(puzzles[2].kind(), "riddle");
    }
}

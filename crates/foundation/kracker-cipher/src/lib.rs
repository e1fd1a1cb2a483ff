//! Kracker Cipher: the Caesar wheel behind every KrackerXR cipher puzzle
//!
//! Pure text transform plus the rotary-input model of the on-screen wheel.
//!
//! # Modules
//! - `engine` - Caesar encode/decode, angle ⇄ shift quantization
//! - `wheel` - Drag/tap state for the rotary control
//! - `analysis` - Brute force and English-frequency ranking for hints
//!
//! ```text
//!        outer ring (plain)      A B C D E ...
//!        inner ring (cipher)     D E F G H ...   shift = 3
//!
//!   drag angle ──► normalize ──► round(angle / 13.85°) ──► (26 - steps) mod 26
//! ```

pub mod analysis;
pub mod engine;
pub mod wheel;

pub use analysis::Candidate;
pub use engine::{angle_to_shift, decode, encode, shift_to_angle, transform};
pub use wheel::Wheel;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The 26-letter wheel alphabet, index 0..25
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Number of letters on the wheel
pub const LETTERS: i64 = 26;

/// Degrees between two adjacent letters on the wheel
pub const STEP_DEGREES: f64 = 360.0 / LETTERS as f64;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mode: {0} (expected encode or decode)")]
    InvalidMode(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rotational offset of the inner ring, always in 0..=25
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Shift(u8);

impl Shift {
    pub const ZERO: Shift = Shift(0);

    /// Wrap any integer onto the wheel
    pub fn new(value: i64) -> Self {
        Shift(value.rem_euclid(LETTERS) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The shift that undoes this one: `(26 - shift) mod 26`
    pub fn inverse(self) -> Self {
        Shift::new(LETTERS - self.0 as i64)
    }

    /// Move around the wheel by `delta` letters
    pub fn offset(self, delta: i64) -> Self {
        Shift::new(self.0 as i64 + delta.rem_euclid(LETTERS))
    }

    /// Every shift on the wheel, in order
    pub fn all() -> impl Iterator<Item = Shift> {
        (0..LETTERS).map(Shift::new)
    }
}

impl From<i64> for Shift {
    fn from(value: i64) -> Self {
        Shift::new(value)
    }
}

impl From<Shift> for u8 {
    fn from(shift: Shift) -> Self {
        shift.0
    }
}

impl From<Shift> for i64 {
    fn from(shift: Shift) -> Self {
        shift.0 as i64
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of the transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Encode,
    Decode,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Encode => "encode",
            Mode::Decode => "decode",
        }
    }

    /// Shift actually applied to letter indices in this mode
    pub fn effective(self, shift: Shift) -> Shift {
        match self {
            Mode::Encode => shift,
            Mode::Decode => shift.inverse(),
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Mode::Encode => Mode::Decode,
            Mode::Decode => Mode::Encode,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "encode" | "enc" | "e" => Ok(Mode::Encode),
            "decode" | "dec" | "d" => Ok(Mode::Decode),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

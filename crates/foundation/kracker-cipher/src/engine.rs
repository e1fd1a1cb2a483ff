//! Caesar Wheel Engine
//!
//! Stateless letter rotation and the angle ⇄ shift mapping of the wheel.
//! Every function here is total: any string, any integer, any angle.

use crate::{Mode, Shift, LETTERS, STEP_DEGREES};

// ═══════════════════════════════════════════════════════════
// TEXT TRANSFORM
// ═══════════════════════════════════════════════════════════

/// Rotate every letter of `text` by `shift` in the given direction.
///
/// Input is uppercased character by character; anything outside A–Z
/// (digits, punctuation, whitespace, non-ASCII) is copied through, so the
/// output has exactly as many characters as the input.
pub fn transform(text: &str, shift: i64, mode: Mode) -> String {
    let effective = mode.effective(Shift::new(shift)).value();
    text.chars()
        .map(|c| rotate(c.to_ascii_uppercase(), effective))
        .collect()
}

pub fn encode(text: &str, shift: i64) -> String {
    transform(text, shift, Mode::Encode)
}

pub fn decode(text: &str, shift: i64) -> String {
    transform(text, shift, Mode::Decode)
}

fn rotate(c: char, shift: u8) -> char {
    if c.is_ascii_uppercase() {
        (((c as u8 - b'A') + shift) % LETTERS as u8 + b'A') as char
    } else {
        c
    }
}

// ═══════════════════════════════════════════════════════════
// WHEEL GEOMETRY
// ═══════════════════════════════════════════════════════════

/// Snap a cumulative drag angle to the nearest letter and read the shift.
///
/// The inner ring turns against the shift direction, hence `26 - steps`.
/// Non-finite angles read as shift 0.
pub fn angle_to_shift(angle_degrees: f64) -> Shift {
    if !angle_degrees.is_finite() {
        return Shift::ZERO;
    }

    let normalized = angle_degrees.rem_euclid(360.0);
    let steps = (normalized / STEP_DEGREES).round() as i64 % LETTERS;
    Shift::new(LETTERS - steps)
}

/// Exact resting angle for `shift`, used to snap the wheel after a drag.
pub fn shift_to_angle(shift: Shift) -> f64 {
    let steps = shift.inverse().value();
    steps as f64 * STEP_DEGREES
}

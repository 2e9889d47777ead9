//! International Morse code table
//!
//! Letters and digits are looked up by their offset from `'A'` / `'0'`.
//! Slash has a fixed pattern; spaces and unsupported characters have none.

use crate::types::{Mark, Symbol};
use Mark::{Dah as H, Dit as I};

/// A, B, ... Z
static LETTERS: [&[Mark]; 26] = [
    &[I, H],
    &[H, I, I, I],
    &[H, I, H, I],
    &[H, I, I],
    &[I],
    &[I, I, H, I],
    &[H, H, I],
    &[I, I, I, I],
    &[I, I],
    &[I, H, H, H],
    &[H, I, H],
    &[I, H, I, I],
    &[H, H],
    &[H, I],
    &[H, H, H],
    &[I, H, H, I],
    &[H, H, I, H],
    &[I, H, I],
    &[I, I, I],
    &[H],
    &[I, I, H],
    &[I, I, I, H],
    &[I, H, H],
    &[H, I, I, H],
    &[H, I, H, H],
    &[H, H, I, I],
];

/// 0, 1, ... 9
static DIGITS: [&[Mark]; 10] = [
    &[H, H, H, H, H],
    &[I, H, H, H, H],
    &[I, I, H, H, H],
    &[I, I, I, H, H],
    &[I, I, I, I, H],
    &[I, I, I, I, I],
    &[H, I, I, I, I],
    &[H, H, I, I, I],
    &[H, H, H, I, I],
    &[H, H, H, H, I],
];

/// Forward slash
pub const SLASH: &[Mark] = &[H, I, I, H, I];

/// Pattern for letter offset `index` (0 = 'A'), if in range
pub fn letter_pattern(index: u8) -> Option<&'static [Mark]> {
    LETTERS.get(index as usize).copied()
}

/// Pattern for digit `index` (0 = '0'), if in range
pub fn digit_pattern(index: u8) -> Option<&'static [Mark]> {
    DIGITS.get(index as usize).copied()
}

impl Symbol {
    /// Morse pattern for this symbol.
    ///
    /// `None` for `Space` and `Unsupported`, which are never keyed.
    pub fn pattern(&self) -> Option<&'static [Mark]> {
        match *self {
            Symbol::Letter(index) => letter_pattern(index),
            Symbol::Digit(index) => digit_pattern(index),
            Symbol::Slash => Some(SLASH),
            Symbol::Space | Symbol::Unsupported => None,
        }
    }

    /// Units this symbol occupies when sent, including its trailing spacing
    pub fn keyed_units(&self) -> u32 {
        match self.pattern() {
            Some(marks) => {
                let mark_units: u32 = marks.iter().map(|m| m.duration_units() + 1).sum();
                mark_units + 2
            }
            None if *self == Symbol::Space => 3,
            None => 0,
        }
    }
}

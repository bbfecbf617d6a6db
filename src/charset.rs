use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{PolicyError, Result};

/// A character category a policy can require.
///
/// The three built-in classes draw from fixed ASCII ranges. [`CharClass::Special`]
/// draws from the policy's `allowed_specials` list instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII uppercase letters `A-Z`.
    Upper,
    /// ASCII lowercase letters `a-z`.
    Lower,
    /// ASCII digits `0-9`.
    Digit,
    /// Characters listed in the policy's `allowed_specials`.
    Special,
}

impl CharClass {
    /// All classes in seeding order.
    pub const ALL: [CharClass; 4] = [Self::Upper, Self::Lower, Self::Digit, Self::Special];

    /// Draws one character of this class uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` error when drawing a special character and
    /// `specials` is empty. Validation rejects such policies up front, so this
    /// only fires if an unvalidated specials list reaches the generator.
    pub fn draw<R: Rng + ?Sized>(self, rng: &mut R, specials: &[char]) -> Result<char> {
        let c = match self {
            Self::Upper => rng.gen_range(b'A'..=b'Z') as char,
            Self::Lower => rng.gen_range(b'a'..=b'z') as char,
            Self::Digit => rng.gen_range(b'0'..=b'9') as char,
            Self::Special => *specials.choose(rng).ok_or_else(|| {
                PolicyError::invalid_config("no allowed specials defined in policy")
            })?,
        };
        Ok(c)
    }

    /// Returns `true` if `c` belongs to this class.
    pub fn contains(self, c: char, specials: &[char]) -> bool {
        match self {
            Self::Upper => c.is_ascii_uppercase(),
            Self::Lower => c.is_ascii_lowercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Special => specials.contains(&c),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upper => write!(f, "uppercase"),
            Self::Lower => write!(f, "lowercase"),
            Self::Digit => write!(f, "digit"),
            Self::Special => write!(f, "special"),
        }
    }
}

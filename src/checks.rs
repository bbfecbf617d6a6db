//! Password rules shared by the generator's post-checks and by
//! [`PasswordPolicy::violations`].

use std::fmt;

use crate::charset::CharClass;
use crate::policy::PasswordPolicy;

/// Returns `true` if some character repeats more than `max_run` times in a row.
///
/// `None` disables the rule.
pub fn exceeds_run_limit(password: &str, max_run: Option<usize>) -> bool {
    let Some(max_run) = max_run else {
        return false;
    };

    let mut run = 0;
    let mut previous = None;
    for c in password.chars() {
        if previous == Some(c) {
            run += 1;
        } else {
            run = 1;
            previous = Some(c);
        }
        if run > max_run {
            return true;
        }
    }
    false
}

/// Returns the first forbidden substring that occurs in `password`.
pub fn find_denied<'a>(password: &str, deny: &'a [String]) -> Option<&'a str> {
    deny.iter()
        .map(String::as_str)
        .find(|substring| password.contains(substring))
}

/// A single rule a password breaks.
///
/// Messages describe the rule, never the offending characters, so a
/// violation can be logged without leaking the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Fewer characters than `length_min`.
    TooShort {
        /// The policy's minimum.
        min: usize,
    },
    /// More characters than `length_max`.
    TooLong {
        /// The policy's maximum.
        max: usize,
    },
    /// A required category is absent.
    MissingCategory(CharClass),
    /// Whitespace appears although the policy forbids it.
    Whitespace,
    /// A character repeats more often in a row than allowed.
    RunTooLong {
        /// The policy's run limit.
        max_run: usize,
    },
    /// A forbidden substring appears.
    DeniedSubstring(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "shorter than {min} characters"),
            Self::TooLong { max } => write!(f, "longer than {max} characters"),
            Self::MissingCategory(class) => write!(f, "missing a {class} character"),
            Self::Whitespace => write!(f, "contains whitespace"),
            Self::RunTooLong { max_run } => {
                write!(f, "repeats a character more than {max_run} times in a row")
            }
            Self::DeniedSubstring(substring) => {
                write!(f, "contains forbidden substring '{substring}'")
            }
        }
    }
}

impl PasswordPolicy {
    /// Evaluates `password` against every rule of this policy.
    ///
    /// Returns an empty vector when the password complies. Length is counted
    /// in characters, not bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use password_policy::{CharClass, PasswordPolicy, Violation};
    ///
    /// let policy = PasswordPolicy::builder().length_min(4).length_max(8).build().unwrap();
    ///
    /// assert!(policy.violations("aB3x").is_empty());
    /// assert_eq!(
    ///     policy.violations("abcd"),
    ///     vec![
    ///         Violation::MissingCategory(CharClass::Upper),
    ///         Violation::MissingCategory(CharClass::Digit),
    ///     ]
    /// );
    /// ```
    pub fn violations(&self, password: &str) -> Vec<Violation> {
        let mut found = Vec::new();

        let len = password.chars().count();
        if len < self.length_min() {
            found.push(Violation::TooShort {
                min: self.length_min(),
            });
        }
        if len > self.length_max() {
            found.push(Violation::TooLong {
                max: self.length_max(),
            });
        }

        let specials = self.allowed_specials();
        for class in self.required_categories() {
            if !password.chars().any(|c| class.contains(c, specials)) {
                found.push(Violation::MissingCategory(class));
            }
        }

        if self.no_whitespace() && password.chars().any(char::is_whitespace) {
            found.push(Violation::Whitespace);
        }

        if let Some(max_run) = self.max_consecutive_same() {
            if exceeds_run_limit(password, Some(max_run)) {
                found.push(Violation::RunTooLong { max_run });
            }
        }

        if let Some(substring) = find_denied(password, self.deny_substrings()) {
            found.push(Violation::DeniedSubstring(substring.to_string()));
        }

        found
    }

    /// Returns `true` if `password` breaks none of this policy's rules.
    pub fn is_satisfied_by(&self, password: &str) -> bool {
        self.violations(password).is_empty()
    }
}

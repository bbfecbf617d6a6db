use std::fmt;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::charset::CharClass;
use crate::checks::{exceeds_run_limit, find_denied};
use crate::error::{PolicyError, Result};
use crate::policy::PasswordPolicy;

/// Attempt budget used by [`PasswordGenerator::generate`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Generates random passwords that satisfy a [`PasswordPolicy`].
///
/// Each attempt picks a target length, seeds one character of every required
/// category, fills the rest from the enabled generators, shuffles, and then
/// checks the run-length and deny-substring rules. A failing candidate is
/// discarded whole and a fresh one is built; nothing is patched in place.
///
/// The generator borrows the policy and owns its random source. The default
/// source is the thread-local RNG; [`with_rng`](Self::with_rng) accepts any
/// [`Rng`], which makes seeded, reproducible runs possible. A policy can be
/// shared across threads, each thread running its own generator.
///
/// # Examples
///
/// ```
/// use password_policy::{PasswordGenerator, PasswordPolicy};
///
/// let policy = PasswordPolicy::default();
/// let password = PasswordGenerator::new(&policy).generate().unwrap();
///
/// assert!((12..=24).contains(&password.len()));
/// ```
#[derive(Debug)]
pub struct PasswordGenerator<'p, R = ThreadRng> {
    policy: &'p PasswordPolicy,
    rng: R,
}

impl<'p> PasswordGenerator<'p, ThreadRng> {
    /// Creates a generator backed by the thread-local RNG.
    pub fn new(policy: &'p PasswordPolicy) -> Self {
        Self::with_rng(policy, rand::thread_rng())
    }
}

impl<'p, R: Rng> PasswordGenerator<'p, R> {
    /// Creates a generator backed by `rng`.
    pub fn with_rng(policy: &'p PasswordPolicy, rng: R) -> Self {
        Self { policy, rng }
    }

    /// Returns the policy this generator satisfies.
    pub fn policy(&self) -> &'p PasswordPolicy {
        self.policy
    }

    /// Generates a password within [`DEFAULT_MAX_ATTEMPTS`] attempts.
    ///
    /// # Errors
    ///
    /// See [`generate_with_budget`](Self::generate_with_budget).
    pub fn generate(&mut self) -> Result<String> {
        self.generate_with_budget(DEFAULT_MAX_ATTEMPTS)
    }

    /// Generates a password, building at most `max_attempts` candidates.
    ///
    /// At least one candidate is always built, so a budget of `0` behaves
    /// like a budget of `1`.
    ///
    /// # Errors
    ///
    /// - `Exhausted` when every candidate was rejected. This is a probabilistic
    ///   failure: the policy may still be satisfiable with a larger budget.
    /// - `InvalidConfig` when the policy cannot be generated from at all, for
    ///   example a required special with no specials to draw from.
    pub fn generate_with_budget(&mut self, max_attempts: usize) -> Result<String> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt()? {
                Attempt::Accepted(password) => {
                    tracing::debug!(
                        attempts,
                        length = password.chars().count(),
                        "generated password"
                    );
                    return Ok(password);
                }
                Attempt::Rejected(reason) => {
                    tracing::trace!(attempt = attempts, %reason, "candidate rejected");
                }
            }

            if attempts >= max_attempts {
                tracing::warn!(max_attempts, "password generation exhausted attempt budget");
                return Err(PolicyError::exhausted(max_attempts));
            }
        }
    }

    /// Builds and checks one candidate.
    fn attempt(&mut self) -> Result<Attempt> {
        let mut chars = self.build_candidate()?;
        chars.shuffle(&mut self.rng);
        let candidate: String = chars.into_iter().collect();

        if exceeds_run_limit(&candidate, self.policy.max_consecutive_same()) {
            return Ok(Attempt::Rejected(Rejection::RunTooLong));
        }
        if find_denied(&candidate, self.policy.deny_substrings()).is_some() {
            return Ok(Attempt::Rejected(Rejection::DeniedSubstring));
        }
        Ok(Attempt::Accepted(candidate))
    }

    /// Seeds required categories, then fills up to a random target length.
    fn build_candidate(&mut self) -> Result<Vec<char>> {
        let policy = self.policy;
        let specials = policy.allowed_specials();
        let target = self.target_length()?;

        let mut chars = Vec::with_capacity(target);
        for class in policy.required_categories() {
            chars.push(class.draw(&mut self.rng, specials)?);
        }

        // Each generator is equally likely, regardless of its alphabet size.
        let mut pool = vec![CharClass::Upper, CharClass::Lower, CharClass::Digit];
        if policy.require_specials() {
            pool.push(CharClass::Special);
        }
        while chars.len() < target {
            let class = pool[self.rng.gen_range(0..pool.len())];
            chars.push(class.draw(&mut self.rng, specials)?);
        }

        Ok(chars)
    }

    /// Draws the target length from `[effective_min, length_max]`.
    ///
    /// Re-derived on every attempt.
    fn target_length(&mut self) -> Result<usize> {
        let min = self.policy.effective_min_length();
        let max = self.policy.length_max();
        if min == 0 || min > max {
            return Err(PolicyError::invalid_config(format!(
                "no legal password length: effective minimum {min} exceeds length_max {max}"
            )));
        }
        Ok(self.rng.gen_range(min..=max))
    }
}

/// Outcome of one generation attempt.
enum Attempt {
    Accepted(String),
    Rejected(Rejection),
}

/// Why a candidate was discarded. Carries no password content.
#[derive(Debug, Clone, Copy)]
enum Rejection {
    RunTooLong,
    DeniedSubstring,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunTooLong => write!(f, "run too long"),
            Self::DeniedSubstring => write!(f, "denied substring"),
        }
    }
}

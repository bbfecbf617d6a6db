use std::fmt;

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// The single error type raised by policy validation and password generation.
///
/// Two origins share this type and are told apart by [`PolicyErrorKind`]:
///
/// - [`PolicyErrorKind::InvalidConfig`]: the policy itself is malformed or
///   unsatisfiable. Deterministic for a given input; fix the policy and retry.
/// - [`PolicyErrorKind::Exhausted`]: the generator spent its attempt budget
///   without producing a compliant candidate. This is a probabilistic failure,
///   not a correctness one: a larger budget may succeed where a smaller one
///   failed.
///
/// # Examples
///
/// ```
/// use password_policy::{PolicyError, PolicyErrorKind};
///
/// let error = PolicyError::invalid_config("length_min must be <= length_max");
/// assert_eq!(error.kind(), PolicyErrorKind::InvalidConfig);
/// assert!(error.to_string().contains("length_min must be <= length_max"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct PolicyError {
    kind: PolicyErrorKind,
    message: String,
}

impl PolicyError {
    /// Creates a new policy error.
    pub fn new(kind: PolicyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a configuration error naming the violated rule.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(PolicyErrorKind::InvalidConfig, message)
    }

    /// Creates an exhaustion error for a spent attempt budget.
    pub fn exhausted(max_attempts: usize) -> Self {
        Self::new(
            PolicyErrorKind::Exhausted,
            format!(
                "unable to generate password after {max_attempts} attempts; policy too restrictive"
            ),
        )
    }

    /// Returns the error kind.
    pub fn kind(&self) -> PolicyErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if raising the attempt budget could succeed.
    pub fn is_exhausted(&self) -> bool {
        self.kind == PolicyErrorKind::Exhausted
    }
}

/// Origin of a [`PolicyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyErrorKind {
    /// The policy specification is malformed or logically impossible.
    InvalidConfig,
    /// No compliant candidate was produced within the attempt budget.
    Exhausted,
}

impl fmt::Display for PolicyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig => write!(f, "invalid policy"),
            Self::Exhausted => write!(f, "attempt budget exhausted"),
        }
    }
}

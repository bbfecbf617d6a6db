use crate::error::Result;
use crate::policy::{PasswordPolicy, PolicySpec};
use crate::validator::PolicyValidator;

/// Fluent constructor for a [`PasswordPolicy`].
///
/// Starts from the default specification. Nothing is checked until
/// [`build`](Self::build), which runs the full [`PolicyValidator`].
///
/// # Examples
///
/// ```
/// use password_policy::PolicyBuilder;
///
/// let policy = PolicyBuilder::new()
///     .length_min(16)
///     .length_max(16)
///     .deny_substring("password")
///     .deny_substring("password") // deduplicated
///     .build()
///     .expect("valid policy");
///
/// assert_eq!(policy.deny_substrings(), &["password".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    spec: PolicySpec,
}

impl PolicyBuilder {
    /// Creates a builder seeded with the default specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length.
    pub fn length_min(mut self, length_min: i64) -> Self {
        self.spec.length_min = length_min;
        self
    }

    /// Sets the maximum length.
    pub fn length_max(mut self, length_max: i64) -> Self {
        self.spec.length_max = length_max;
        self
    }

    /// Requires (or stops requiring) an uppercase letter.
    pub fn require_upper(mut self, required: bool) -> Self {
        self.spec.require_upper = required;
        self
    }

    /// Requires (or stops requiring) a lowercase letter.
    pub fn require_lower(mut self, required: bool) -> Self {
        self.spec.require_lower = required;
        self
    }

    /// Requires (or stops requiring) a digit.
    pub fn require_digits(mut self, required: bool) -> Self {
        self.spec.require_digits = required;
        self
    }

    /// Requires (or stops requiring) a special character.
    pub fn require_specials(mut self, required: bool) -> Self {
        self.spec.require_specials = required;
        self
    }

    /// Replaces the allowed special characters.
    pub fn allowed_specials<I, S>(mut self, specials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.allowed_specials = Some(specials.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a forbidden substring, ignoring duplicates.
    pub fn deny_substring(mut self, substring: impl Into<String>) -> Self {
        let substring = substring.into();
        let deny = self.spec.deny_substrings.get_or_insert_with(Vec::new);
        if !deny.contains(&substring) {
            deny.push(substring);
        }
        self
    }

    /// Limits runs of one repeated character to `max_run`.
    pub fn max_consecutive_same(mut self, max_run: i64) -> Self {
        self.spec.max_consecutive_same = Some(max_run);
        self
    }

    /// Forbids (or permits) whitespace.
    pub fn no_whitespace(mut self, forbidden: bool) -> Self {
        self.spec.no_whitespace = forbidden;
        self
    }

    /// Returns the specification accumulated so far.
    pub fn spec(&self) -> &PolicySpec {
        &self.spec
    }

    /// Validates the accumulated specification.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` [`PolicyError`](crate::PolicyError) naming
    /// the first violated rule.
    pub fn build(self) -> Result<PasswordPolicy> {
        PolicyValidator.validate(&self.spec)
    }
}

impl From<PolicySpec> for PolicyBuilder {
    fn from(spec: PolicySpec) -> Self {
        Self { spec }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_starts_from_defaults() {
        assert_eq!(PolicyBuilder::new().spec(), &PolicySpec::default());
    }

    #[test]
    fn builder_sets_every_field() {
        let builder = PolicyBuilder::new()
            .length_min(20)
            .length_max(30)
            .require_upper(false)
            .require_lower(false)
            .require_digits(false)
            .require_specials(true)
            .allowed_specials(['%', '!'].iter().map(|c| c.to_string()))
            .deny_substring("p%")
            .max_consecutive_same(2)
            .no_whitespace(false);

        let spec = builder.spec();
        assert_eq!((spec.length_min, spec.length_max), (20, 30));
        assert!(!spec.require_upper && !spec.require_lower && !spec.require_digits);
        assert!(spec.require_specials);
        assert_eq!(
            spec.allowed_specials.as_deref(),
            Some(&["%".to_string(), "!".to_string()][..])
        );
        assert_eq!(spec.deny_substrings.as_deref(), Some(&["p%".to_string()][..]));
        assert_eq!(spec.max_consecutive_same, Some(2));
        assert!(!spec.no_whitespace);
    }

    #[test]
    fn deny_substring_deduplicates() {
        let builder = PolicyBuilder::new()
            .deny_substring("admin")
            .deny_substring("root")
            .deny_substring("admin");

        assert_eq!(
            builder.spec().deny_substrings.as_deref(),
            Some(&["admin".to_string(), "root".to_string()][..])
        );
    }

    #[test]
    fn build_runs_validation() {
        let result = PolicyBuilder::new().length_min(30).length_max(20).build();

        assert!(result.is_err());
    }

    #[test]
    fn builder_from_spec_keeps_fields() {
        let spec = PolicySpec {
            length_min: 8,
            ..PolicySpec::default()
        };

        let policy = PolicyBuilder::from(spec).build().unwrap();
        assert_eq!(policy.length_min(), 8);
    }
}

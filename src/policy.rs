use serde::{Deserialize, Serialize};

use crate::builder::PolicyBuilder;
use crate::charset::CharClass;
use crate::error::{PolicyError, Result};
use crate::generator::PasswordGenerator;
use crate::validator::PolicyValidator;

/// Hard ceiling on either length bound.
pub const MAX_ALLOWED_LENGTH: usize = 1024;

/// An unvalidated policy specification, as read from a key-value document.
///
/// Every field is optional in serialized form; missing keys take the defaults
/// below. Integer fields are signed so that out-of-range values survive
/// decoding and are reported by [`PolicyValidator`] with a precise message.
///
/// | key                    | default |
/// |------------------------|---------|
/// | `length_min`           | 12      |
/// | `length_max`           | 24      |
/// | `require_upper`        | true    |
/// | `require_lower`        | true    |
/// | `require_digits`       | true    |
/// | `require_specials`     | false   |
/// | `allowed_specials`     | none    |
/// | `deny_substrings`      | none    |
/// | `max_consecutive_same` | none    |
/// | `no_whitespace`        | true    |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySpec {
    /// Minimum password length.
    pub length_min: i64,
    /// Maximum password length.
    pub length_max: i64,
    /// Require at least one ASCII uppercase letter.
    pub require_upper: bool,
    /// Require at least one ASCII lowercase letter.
    pub require_lower: bool,
    /// Require at least one ASCII digit.
    pub require_digits: bool,
    /// Require at least one character from `allowed_specials`.
    pub require_specials: bool,
    /// Single-character strings usable as special characters.
    pub allowed_specials: Option<Vec<String>>,
    /// Substrings that must never appear in a password.
    pub deny_substrings: Option<Vec<String>>,
    /// Longest allowed run of one repeated character. `None` disables the rule.
    pub max_consecutive_same: Option<i64>,
    /// Forbid whitespace characters.
    pub no_whitespace: bool,
}

impl Default for PolicySpec {
    fn default() -> Self {
        Self {
            length_min: 12,
            length_max: 24,
            require_upper: true,
            require_lower: true,
            require_digits: true,
            require_specials: false,
            allowed_specials: None,
            deny_substrings: None,
            max_consecutive_same: None,
            no_whitespace: true,
        }
    }
}

/// A validated, immutable password policy.
///
/// The only ways to obtain one are [`PasswordPolicy::from_spec`],
/// [`PolicyBuilder::build`], deserialization (which validates through
/// `TryFrom<PolicySpec>`), or [`Default`]. Fields are not public, so a policy
/// never changes after it passes validation.
///
/// # Examples
///
/// ```
/// use password_policy::PasswordPolicy;
///
/// let policy = PasswordPolicy::builder()
///     .length_min(20)
///     .length_max(30)
///     .require_specials(true)
///     .allowed_specials(["%", "!", "@", "+"])
///     .deny_substring("p%")
///     .deny_substring("a!")
///     .max_consecutive_same(2)
///     .build()
///     .expect("valid policy");
///
/// let password = policy.generate().expect("policy is satisfiable");
/// assert!(policy.is_satisfied_by(&password));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicySpec", into = "PolicySpec")]
pub struct PasswordPolicy {
    pub(crate) length_min: usize,
    pub(crate) length_max: usize,
    pub(crate) require_upper: bool,
    pub(crate) require_lower: bool,
    pub(crate) require_digits: bool,
    pub(crate) require_specials: bool,
    pub(crate) allowed_specials: Option<Vec<char>>,
    pub(crate) deny_substrings: Option<Vec<String>>,
    pub(crate) max_consecutive_same: Option<usize>,
    pub(crate) no_whitespace: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length_min: 12,
            length_max: 24,
            require_upper: true,
            require_lower: true,
            require_digits: true,
            require_specials: false,
            allowed_specials: None,
            deny_substrings: None,
            max_consecutive_same: None,
            no_whitespace: true,
        }
    }
}

impl PasswordPolicy {
    /// Validates a specification and returns the resulting policy.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` [`PolicyError`] naming the first violated rule.
    pub fn from_spec(spec: &PolicySpec) -> Result<Self> {
        PolicyValidator.validate(spec)
    }

    /// Returns the specification this policy was built from.
    ///
    /// `PasswordPolicy::from_spec(&policy.to_spec())` always succeeds and
    /// yields an equal policy.
    pub fn to_spec(&self) -> PolicySpec {
        PolicySpec {
            length_min: self.length_min as i64,
            length_max: self.length_max as i64,
            require_upper: self.require_upper,
            require_lower: self.require_lower,
            require_digits: self.require_digits,
            require_specials: self.require_specials,
            allowed_specials: self
                .allowed_specials
                .as_ref()
                .map(|specials| specials.iter().map(|c| c.to_string()).collect()),
            deny_substrings: self.deny_substrings.clone(),
            max_consecutive_same: self.max_consecutive_same.map(|n| n as i64),
            no_whitespace: self.no_whitespace,
        }
    }

    /// Decodes and validates a policy from a JSON document.
    ///
    /// Missing keys take their defaults. A document that is not a JSON object
    /// of the expected shape (for example a non-integer `length_min`) is
    /// reported as an `InvalidConfig` error, the same as a rule violation.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` [`PolicyError`] if the document is malformed
    /// or the decoded specification fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: PolicySpec = serde_json::from_str(json)
            .map_err(|e| PolicyError::invalid_config(format!("malformed policy document: {e}")))?;
        Self::from_spec(&spec)
    }

    /// Encodes the policy as a JSON object with every key present.
    pub fn to_json(&self) -> String {
        // PolicySpec has only string keys, integers, bools and string lists,
        // none of which serde_json can fail to encode.
        serde_json::to_string(&self.to_spec()).expect("PolicySpec always encodes as JSON")
    }

    /// Starts a builder seeded with the default specification.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::new()
    }

    /// Generates one password with the thread-local RNG and the default
    /// attempt budget.
    ///
    /// # Errors
    ///
    /// See [`PasswordGenerator::generate`].
    pub fn generate(&self) -> Result<String> {
        PasswordGenerator::new(self).generate()
    }

    /// Minimum password length.
    pub fn length_min(&self) -> usize {
        self.length_min
    }

    /// Maximum password length.
    pub fn length_max(&self) -> usize {
        self.length_max
    }

    /// Whether uppercase letters are required.
    pub fn require_upper(&self) -> bool {
        self.require_upper
    }

    /// Whether lowercase letters are required.
    pub fn require_lower(&self) -> bool {
        self.require_lower
    }

    /// Whether digits are required.
    pub fn require_digits(&self) -> bool {
        self.require_digits
    }

    /// Whether special characters are required.
    pub fn require_specials(&self) -> bool {
        self.require_specials
    }

    /// Allowed special characters, or an empty slice when none are configured.
    pub fn allowed_specials(&self) -> &[char] {
        self.allowed_specials.as_deref().unwrap_or(&[])
    }

    /// Forbidden substrings, or an empty slice when none are configured.
    pub fn deny_substrings(&self) -> &[String] {
        self.deny_substrings.as_deref().unwrap_or(&[])
    }

    /// Longest allowed run of one repeated character, if limited.
    pub fn max_consecutive_same(&self) -> Option<usize> {
        self.max_consecutive_same
    }

    /// Whether whitespace is forbidden.
    pub fn no_whitespace(&self) -> bool {
        self.no_whitespace
    }

    /// Required categories, in seeding order.
    pub fn required_categories(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(|class| self.requires(*class))
    }

    /// Number of required categories.
    pub fn required_category_count(&self) -> usize {
        self.required_categories().count()
    }

    /// Shortest length the generator will pick: enough room for one character
    /// of every required category.
    pub fn effective_min_length(&self) -> usize {
        self.length_min.max(self.required_category_count())
    }

    /// Whether `class` is required by this policy.
    pub fn requires(&self, class: CharClass) -> bool {
        match class {
            CharClass::Upper => self.require_upper,
            CharClass::Lower => self.require_lower,
            CharClass::Digit => self.require_digits,
            CharClass::Special => self.require_specials,
        }
    }
}

impl TryFrom<PolicySpec> for PasswordPolicy {
    type Error = PolicyError;

    fn try_from(spec: PolicySpec) -> Result<Self> {
        Self::from_spec(&spec)
    }
}

impl From<PasswordPolicy> for PolicySpec {
    fn from(policy: PasswordPolicy) -> Self {
        policy.to_spec()
    }
}

use crate::error::{PolicyError, Result};
use crate::policy::{PasswordPolicy, PolicySpec, MAX_ALLOWED_LENGTH};

/// Checks a [`PolicySpec`] for internal consistency and promotes it to a
/// [`PasswordPolicy`].
///
/// Validation is fail-fast: the first violated rule is reported and the rest
/// are not evaluated. Rules are checked in this order:
///
/// 1. both length bounds are `> 0`
/// 2. `length_min <= length_max`
/// 3. `allowed_specials` entries are single characters, and the list is
///    present and non-empty when `require_specials` is set
/// 4. no `deny_substrings` entry is empty
/// 5. both length bounds are `<= 1024`
/// 6. no special is whitespace when `no_whitespace` is set
/// 7. `max_consecutive_same >= 1` when set
/// 8. the required-category count fits in `length_max`
///
/// Rule 3 checks entry length whenever `allowed_specials` is present, not
/// only when `require_specials` is set. A list such as `["ab"]` is therefore
/// rejected even with specials optional, since a multi-character entry can
/// never be drawn as one character.
///
/// # Examples
///
/// ```
/// use password_policy::{PolicySpec, PolicyValidator};
///
/// let spec = PolicySpec { length_min: 15, length_max: 12, ..PolicySpec::default() };
/// let error = PolicyValidator.validate(&spec).unwrap_err();
/// assert!(error.message().contains("length_min must be <= length_max"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyValidator;

impl PolicyValidator {
    /// Validates `spec`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` [`PolicyError`] naming the violated rule.
    pub fn validate(&self, spec: &PolicySpec) -> Result<PasswordPolicy> {
        let result = Self::check(spec);
        if let Err(error) = &result {
            tracing::debug!(reason = %error.message(), "policy specification rejected");
        }
        result
    }

    fn check(spec: &PolicySpec) -> Result<PasswordPolicy> {
        if spec.length_min <= 0 || spec.length_max <= 0 {
            return Err(PolicyError::invalid_config(
                "length_min and length_max must be > 0",
            ));
        }

        if spec.length_min > spec.length_max {
            return Err(PolicyError::invalid_config(
                "length_min must be <= length_max",
            ));
        }

        let allowed_specials = spec
            .allowed_specials
            .as_deref()
            .map(parse_specials)
            .transpose()?;

        if spec.require_specials {
            match &allowed_specials {
                None => {
                    return Err(PolicyError::invalid_config(
                        "allowed_specials is required when require_specials is set",
                    ))
                }
                Some(specials) if specials.is_empty() => {
                    return Err(PolicyError::invalid_config(
                        "allowed_specials must not be empty",
                    ))
                }
                Some(_) => {}
            }
        }

        if let Some(deny) = &spec.deny_substrings {
            if deny.iter().any(String::is_empty) {
                return Err(PolicyError::invalid_config(
                    "deny_substrings must not contain empty strings",
                ));
            }
        }

        let limit = MAX_ALLOWED_LENGTH as i64;
        if spec.length_min > limit || spec.length_max > limit {
            return Err(PolicyError::invalid_config(format!(
                "length_min and length_max must be <= {MAX_ALLOWED_LENGTH}"
            )));
        }

        if spec.no_whitespace {
            if let Some(specials) = &allowed_specials {
                if specials.iter().any(|c| c.is_whitespace()) {
                    return Err(PolicyError::invalid_config(
                        "allowed_specials must not contain whitespace when no_whitespace is set",
                    ));
                }
            }
        }

        if let Some(max_run) = spec.max_consecutive_same {
            if max_run < 1 {
                return Err(PolicyError::invalid_config(
                    "max_consecutive_same must be >= 1",
                ));
            }
        }

        let required_count = [
            spec.require_upper,
            spec.require_lower,
            spec.require_digits,
            spec.require_specials,
        ]
        .into_iter()
        .filter(|required| *required)
        .count();
        // Bounded by 1..=MAX_ALLOWED_LENGTH above, so the casts are lossless.
        let length_max = spec.length_max as usize;
        if required_count > length_max {
            return Err(PolicyError::invalid_config(format!(
                "length_max ({length_max}) must be >= the number of required categories ({required_count})"
            )));
        }

        Ok(PasswordPolicy {
            length_min: spec.length_min as usize,
            length_max,
            require_upper: spec.require_upper,
            require_lower: spec.require_lower,
            require_digits: spec.require_digits,
            require_specials: spec.require_specials,
            allowed_specials,
            deny_substrings: spec.deny_substrings.clone(),
            max_consecutive_same: spec.max_consecutive_same.map(|n| n as usize),
            no_whitespace: spec.no_whitespace,
        })
    }
}

/// Converts specials entries to characters, rejecting anything that is not
/// exactly one character long.
fn parse_specials(entries: &[String]) -> Result<Vec<char>> {
    entries
        .iter()
        .map(|entry| {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(PolicyError::invalid_config(
                    "allowed_specials must contain only single-character strings",
                )),
            }
        })
        .collect()
}

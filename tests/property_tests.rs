//! Property tests for password-policy.
//!
//! These tests validate the generator's output invariants and the
//! validator's acceptance rules over arbitrary policy specifications.

use password_policy::{
    checks::exceeds_run_limit, PasswordGenerator, PasswordPolicy, PolicyErrorKind, PolicySpec,
    MAX_ALLOWED_LENGTH,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Strategy: Generate arbitrary specials lists
fn arb_specials() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::of(prop::collection::vec(
        prop::sample::select(vec!["!", "@", "#", "$", "%", "^", "&", "*", "+", "-"]),
        1..5,
    ))
    .prop_map(|specials| specials.map(|list| list.into_iter().map(String::from).collect()))
}

// Strategy: Generate a valid specification
fn arb_valid_spec() -> impl Strategy<Value = PolicySpec> {
    (
        1i64..=40,
        0i64..=20,
        any::<[bool; 4]>(),
        arb_specials(),
        prop::option::of(prop::collection::vec(
            prop::string::string_regex("[a-z%!@]{2,4}").unwrap(),
            0..4,
        )),
        prop::option::of(2i64..=4),
    )
        .prop_map(
            |(length_min, span, [upper, lower, digits, specials], allowed, deny, max_run)| {
                let require_specials = specials && allowed.is_some();
                PolicySpec {
                    length_min,
                    length_max: (length_min + span).max(4),
                    require_upper: upper,
                    require_lower: lower,
                    require_digits: digits,
                    require_specials,
                    allowed_specials: allowed,
                    deny_substrings: deny,
                    max_consecutive_same: max_run,
                    no_whitespace: true,
                }
            },
        )
}

// Strategy: Generate a specification that may break any rule
fn arb_any_spec() -> impl Strategy<Value = PolicySpec> {
    (
        -5i64..1100,
        -5i64..1100,
        any::<[bool; 4]>(),
        prop::option::of(prop::collection::vec(
            prop::string::string_regex("[!@ ]{0,2}").unwrap(),
            0..4,
        )),
        prop::option::of(prop::collection::vec(
            prop::string::string_regex("[a-z]{0,3}").unwrap(),
            0..3,
        )),
        prop::option::of(-2i64..4),
        any::<bool>(),
    )
        .prop_map(
            |(length_min, length_max, flags, allowed, deny, max_run, no_whitespace)| PolicySpec {
                length_min,
                length_max,
                require_upper: flags[0],
                require_lower: flags[1],
                require_digits: flags[2],
                require_specials: flags[3],
                allowed_specials: allowed,
                deny_substrings: deny,
                max_consecutive_same: max_run,
                no_whitespace,
            },
        )
}

proptest! {
    /// Property: every generated password satisfies its policy
    ///
    /// Length stays within [effective minimum, length_max], every required
    /// category appears, runs respect the limit and no denied substring occurs.
    /// Exhaustion is the only acceptable failure.
    #[test]
    fn proptest_generated_passwords_comply(spec in arb_valid_spec(), seed in any::<u64>()) {
        let policy = PasswordPolicy::from_spec(&spec).expect("strategy builds valid specs");
        let mut generator = PasswordGenerator::with_rng(&policy, StdRng::seed_from_u64(seed));

        match generator.generate() {
            Ok(password) => {
                let len = password.chars().count();
                prop_assert!(len >= policy.effective_min_length());
                prop_assert!(len <= policy.length_max());
                prop_assert!(
                    policy.violations(&password).is_empty(),
                    "violations: {:?}",
                    policy.violations(&password)
                );
                for class in policy.required_categories() {
                    prop_assert!(password.chars().any(|c| class.contains(c, policy.allowed_specials())));
                }
                prop_assert!(!exceeds_run_limit(&password, policy.max_consecutive_same()));
                for denied in policy.deny_substrings() {
                    prop_assert!(!password.contains(denied.as_str()));
                }
                prop_assert!(!password.chars().any(char::is_whitespace));
            }
            Err(error) => prop_assert_eq!(error.kind(), PolicyErrorKind::Exhausted),
        }
    }

    /// Property: a valid policy survives serialization unchanged
    #[test]
    fn proptest_serialization_round_trip(spec in arb_valid_spec()) {
        let policy = PasswordPolicy::from_spec(&spec).expect("strategy builds valid specs");

        let json = policy.to_json();
        let decoded = PasswordPolicy::from_json(&json).unwrap();

        prop_assert_eq!(&decoded, &policy);
        prop_assert_eq!(decoded.to_spec(), spec);
    }

    /// Property: accepted specifications always hold the policy invariants
    #[test]
    fn proptest_validation_accepts_only_consistent_specs(spec in arb_any_spec()) {
        let required = [spec.require_upper, spec.require_lower, spec.require_digits, spec.require_specials]
            .into_iter()
            .filter(|flag| *flag)
            .count() as i64;

        match PasswordPolicy::from_spec(&spec) {
            Ok(policy) => {
                prop_assert!(spec.length_min > 0);
                prop_assert!(spec.length_min <= spec.length_max);
                prop_assert!(spec.length_max <= MAX_ALLOWED_LENGTH as i64);
                prop_assert!(required <= spec.length_max);
                prop_assert!(spec.max_consecutive_same.map_or(true, |n| n >= 1));
                if spec.require_specials {
                    prop_assert!(!policy.allowed_specials().is_empty());
                }
                if spec.no_whitespace {
                    prop_assert!(!policy.allowed_specials().iter().any(|c| c.is_whitespace()));
                }
                prop_assert!(policy.deny_substrings().iter().all(|s| !s.is_empty()));
            }
            Err(error) => prop_assert_eq!(error.kind(), PolicyErrorKind::InvalidConfig),
        }
    }
}

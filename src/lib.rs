//! Declarative password policies and a constraint-satisfying password generator.
//!
//! This crate provides:
//! - **Validation**: a [`PolicySpec`] is checked once by [`PolicyValidator`] and
//!   becomes an immutable [`PasswordPolicy`]; impossible or malformed rule sets
//!   are rejected before any generation is attempted
//! - **Generation**: [`PasswordGenerator`] builds random candidates that hold
//!   every required character category, shuffles them, and retries within a
//!   bounded attempt budget until the run-length and deny-substring rules pass
//! - **Compliance checks**: [`PasswordPolicy::violations`] evaluates any string
//!   against the same rules
//!
//! # Core Types
//!
//! - [`PolicySpec`]: Raw, serializable policy settings with documented defaults
//! - [`PolicyBuilder`]: Fluent construction of a validated policy
//! - [`PasswordPolicy`]: Validated, read-only policy
//! - [`PasswordGenerator`]: Rejection-sampling generator over an injectable RNG
//! - [`PolicyError`]: Single error type for configuration and exhaustion failures
//!
//! # Examples
//!
//! ```
//! use password_policy::PasswordPolicy;
//!
//! let policy = PasswordPolicy::builder()
//!     .length_min(20)
//!     .length_max(30)
//!     .require_specials(true)
//!     .allowed_specials(["%", "!", "@", "+"])
//!     .deny_substring("p%")
//!     .deny_substring("a!")
//!     .max_consecutive_same(2)
//!     .build()
//!     .expect("policy is valid");
//!
//! let password = policy.generate().expect("policy is satisfiable");
//! assert!((20..=30).contains(&password.chars().count()));
//! assert!(!password.contains("p%"));
//! ```
//!
//! # Logging
//!
//! Events are emitted through [`tracing`]. Generated passwords are never part
//! of an event; only lengths, attempt counts, and rejection reasons are.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod charset;
pub mod checks;
mod error;
mod generator;
mod policy;
mod validator;

pub use builder::PolicyBuilder;
pub use charset::CharClass;
pub use checks::Violation;
pub use error::{PolicyError, PolicyErrorKind, Result};
pub use generator::{PasswordGenerator, DEFAULT_MAX_ATTEMPTS};
pub use policy::{PasswordPolicy, PolicySpec, MAX_ALLOWED_LENGTH};
pub use validator::PolicyValidator;

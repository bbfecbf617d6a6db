//! Password policy and generation demonstration.
//!
//! This example shows:
//! 1. Building and validating a policy with `PolicyBuilder`
//! 2. Generating a compliant password
//! 3. Rejection of an impossible policy
//! 4. Budget exhaustion on an unsatisfiable policy
//!
//! Run with: `cargo run --example generate_password`

use password_policy::{PasswordGenerator, PasswordPolicy, PolicyError};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Password Generation Example ===\n");

    // Scenario 1: Mixed policy with specials, deny list and run limit
    println!("--- Scenario 1: Compliant Password ---");
    match generate_scenario_password() {
        Ok(password) => println!("Password: {}\nlength: {}", password, password.chars().count()),
        Err(e) => println!("Policy error: {}", e),
    }

    // Scenario 2: Four required categories cannot fit in three characters
    println!("\n--- Scenario 2: Impossible Policy ---");
    let result = PasswordPolicy::builder()
        .length_min(1)
        .length_max(3)
        .require_specials(true)
        .allowed_specials(["!"])
        .build();
    match result {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Policy error (expected): {}", e),
    }

    // Scenario 3: Valid policy whose deny list rules out every candidate
    println!("\n--- Scenario 3: Exhausted Budget ---");
    let mut builder = PasswordPolicy::builder()
        .length_min(1)
        .length_max(1)
        .require_lower(false)
        .require_digits(false);
    for c in 'A'..='Z' {
        builder = builder.deny_substring(c.to_string());
    }
    match builder.build() {
        Ok(policy) => match PasswordGenerator::new(&policy).generate_with_budget(100) {
            Ok(_) => println!("Unexpected success"),
            Err(e) => println!("Policy error (expected): {}", e),
        },
        Err(e) => println!("Policy error: {}", e),
    }

    println!("\n=== Example Complete ===");
}

fn generate_scenario_password() -> Result<String, PolicyError> {
    let policy = PasswordPolicy::builder()
        .length_min(20)
        .length_max(30)
        .require_specials(true)
        .allowed_specials(["%", "!", "@", "+"])
        .deny_substring("p%")
        .deny_substring("a!")
        .max_consecutive_same(2)
        .no_whitespace(true)
        .build()?;

    println!("Policy: {}", policy.to_json());
    policy.generate()
}

// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration input rules.

use crate::error::DevsyncError;

/// Minimum length of a display name after trimming.
pub const MIN_NAME_LEN: usize = 2;

/// Emails are matched case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub name: String,
}

/// Check the registration fields. The password itself is returned to the
/// caller untouched for hashing; only its length is checked here.
pub fn validate_registration(
    email: &str,
    name: &str,
    password: &str,
    min_password_len: usize,
) -> Result<Registration, DevsyncError> {
    let email = normalize_email(email);
    if !looks_like_email(&email) {
        return Err(DevsyncError::validation("email", "must be a valid email address"));
    }
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return Err(DevsyncError::validation(
            "name",
            format!("must be at least {MIN_NAME_LEN} characters"),
        ));
    }
    if password.chars().count() < min_password_len {
        return Err(DevsyncError::validation(
            "password",
            format!("must be at least {min_password_len} characters"),
        ));
    }
    Ok(Registration {
        email,
        name: name.to_string(),
    })
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

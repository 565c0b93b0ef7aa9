//! Field validation for the sign-in and sign-up forms.
//!
//! Rules run in a fixed order and stop at the first failure, so the user is
//! told about one problem at a time: profile image, name, email presence,
//! email grammar, password, confirmation. Checks are pure; surfacing the
//! message and aborting the flow is the caller's job.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Per-field validation failures, in the order they are checked.
///
/// `Display` strings are the exact messages shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select profile image")]
    MissingImage,
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your email")]
    MissingEmail,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Please enter your password")]
    MissingPassword,
    #[error("Please confirm your password")]
    MissingConfirmPassword,
    #[error("Password does not match")]
    PasswordMismatch,
}

/// Email grammar: restricted local part, `@`, alphanumeric-led domain labels
/// with at least one dot-separated label.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9+._%\-]{1,256}@[A-Za-z0-9][A-Za-z0-9\-]{0,64}(\.[A-Za-z0-9][A-Za-z0-9\-]{0,25})+$",
    )
    .expect("email pattern is valid")
});

fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !EMAIL.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Check the sign-in form fields. First failure wins.
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ValidationError> {
    check_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// Check the sign-up form fields. First failure wins; later fields are not
/// inspected once an earlier one fails.
pub fn validate_sign_up(
    has_image: bool,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if !has_image {
        return Err(ValidationError::MissingImage);
    }
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    check_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if confirm_password.is_empty() {
        return Err(ValidationError::MissingConfirmPassword);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_priority_order() {
        assert_eq!(
            validate_sign_in("", ""),
            Err(ValidationError::MissingEmail)
        );
        assert_eq!(
            validate_sign_in("abc", "p1"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_sign_in("ann@x.com", ""),
            Err(ValidationError::MissingPassword)
        );
        assert_eq!(validate_sign_in("ann@x.com", "p1"), Ok(()));
    }

    #[test]
    fn test_sign_up_priority_order() {
        // Image first, even when everything else is empty too
        assert_eq!(
            validate_sign_up(false, "", "", "", ""),
            Err(ValidationError::MissingImage)
        );
        assert_eq!(
            validate_sign_up(true, "", "", "", ""),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            validate_sign_up(true, "Ann", "", "", ""),
            Err(ValidationError::MissingEmail)
        );
        assert_eq!(
            validate_sign_up(true, "Ann", "not-an-email", "", ""),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_sign_up(true, "Ann", "ann@x.com", "", ""),
            Err(ValidationError::MissingPassword)
        );
        assert_eq!(
            validate_sign_up(true, "Ann", "ann@x.com", "p1", ""),
            Err(ValidationError::MissingConfirmPassword)
        );
        assert_eq!(
            validate_sign_up(true, "Ann", "ann@x.com", "p1", "p2"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(validate_sign_up(true, "Ann", "ann@x.com", "p1", "p1"), Ok(()));
    }

    #[test]
    fn test_email_grammar() {
        for valid in ["a@b.com", "ann+tag@x.co", "a.b_c%d@mail.example.org"] {
            assert_eq!(validate_sign_in(valid, "p"), Ok(()), "{valid}");
        }
        for invalid in ["abc", "a@b", "a@@b.com", "@b.com", "a@-b.com", "a b@c.com"] {
            assert_eq!(
                validate_sign_in(invalid, "p"),
                Err(ValidationError::InvalidEmail),
                "{invalid}"
            );
        }
    }

    #[test]
    fn test_password_comparison_is_case_sensitive() {
        assert_eq!(
            validate_sign_up(true, "Ann", "ann@x.com", "Secret", "secret"),
            Err(ValidationError::PasswordMismatch)
        );
    }
}

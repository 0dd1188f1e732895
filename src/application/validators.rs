use std::fmt;

use crate::app_error::{AppError, AppResult};

/// Validates that the input looks like an email address.
///
/// Deliberately loose: non-empty and containing `@`. No trimming, so
/// `" a@x.com"` is accepted and stored as-is.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

/// An email that passed [`is_valid_email`]. The only way to build one is
/// [`WaitlistEmail::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    pub fn parse(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        if !is_valid_email(&raw) {
            return Err(AppError::InvalidEmail);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

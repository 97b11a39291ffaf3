//! Phone numbers in the canonical form used for lookups and SMS delivery

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Country prefix applied to bare ten-digit local numbers
const COUNTRY_PREFIX: &str = "90";

/// A normalized phone number: digits only, country prefix applied
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize user input
    ///
    /// Strips spaces, dashes, parentheses and plus signs. A ten-digit result
    /// that does not already start with the country prefix gets it prepended.
    pub fn normalize(raw: &str) -> Result<Self, DomainError> {
        let stripped: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
            .collect();

        if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidPhoneNumber);
        }

        if stripped.len() == 10 && !stripped.starts_with(COUNTRY_PREFIX) {
            return Ok(Self(format!("{COUNTRY_PREFIX}{stripped}")));
        }
        Ok(Self(stripped))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

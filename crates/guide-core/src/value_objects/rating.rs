//! Star ratings and their aggregate

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A review rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    pub fn new(value: i32) -> Result<Self, DomainError> {
        if (i32::from(Self::MIN)..=i32::from(Self::MAX)).contains(&value) {
            Ok(Self(value as i16))
        } else {
            Err(DomainError::InvalidRating(value))
        }
    }

    /// Rebuild from a stored value; the column carries a range check
    pub fn from_stored(value: i16) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    #[inline]
    pub fn value(self) -> i16 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Rating::new(value).map_err(serde::de::Error::custom)
    }
}

/// Cached aggregate kept on a business: mean and count of visible reviews
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: i32,
}

impl RatingSummary {
    /// Aggregate the ratings of approved and active reviews
    ///
    /// An empty set yields an average of 0.0 and a count of 0.
    pub fn from_ratings(ratings: &[i16]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }
        let sum: f64 = ratings.iter().map(|r| f64::from(*r)).sum();
        Self {
            average: sum / ratings.len() as f64,
            count: ratings.len() as i32,
        }
    }
}

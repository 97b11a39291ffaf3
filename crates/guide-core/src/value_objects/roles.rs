//! Account roles stored as a 64-bit bitfield
//!
//! An account may hold several roles at once. Roles do not imply each other;
//! callers that want "admin can do what an owner can" check both explicitly.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Role flags attached to a user account
    ///
    /// Stored as BIGINT in the database, serialized as a list of role names in JSON.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Roles: u64 {
        /// Site administrator: approvals, moderation, audit log
        const ADMIN          = 1 << 0;
        /// Regular signed-in visitor
        const USER           = 1 << 1;
        /// Owner of one or more listed businesses
        const BUSINESS_OWNER = 1 << 2;
    }
}

impl Roles {
    const NAMES: [(Roles, &'static str); 3] = [
        (Roles::ADMIN, "Admin"),
        (Roles::USER, "User"),
        (Roles::BUSINESS_OWNER, "BusinessOwner"),
    ];

    /// Check if the set contains the given role
    #[inline]
    pub fn has(&self, role: Roles) -> bool {
        self.contains(role)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.contains(Roles::ADMIN)
    }

    /// Owners and admins may manage owner-scoped businesses
    #[inline]
    pub fn can_manage_businesses(&self) -> bool {
        self.intersects(Roles::ADMIN | Roles::BUSINESS_OWNER)
    }

    /// Get the raw bits as i64 (for database storage)
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.bits() as i64
    }

    /// Create from raw i64 bits (from database)
    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Roles::from_bits_truncate(bits as u64)
    }

    /// Parse a single role name, case-insensitive ("Admin", "user", "BusinessOwner")
    pub fn parse(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(role, _)| *role)
    }

    /// Names of all roles that are set
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(role, _)| self.contains(*role))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for Roles {
    fn default() -> Self {
        Roles::USER
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(","))
    }
}

impl Serialize for Roles {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Roles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        names.iter().try_fold(Roles::empty(), |acc, name| {
            Roles::parse(name)
                .map(|role| acc | role)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown role: {name}")))
        })
    }
}
